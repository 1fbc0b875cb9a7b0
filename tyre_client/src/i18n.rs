use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Value of the document `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::En => Direction::Ltr,
            Self::Ar => Direction::Rtl,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(UnknownLanguage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language")]
pub struct UnknownLanguage;

/// Text direction of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// Where a localized string ends up on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Text,
    Placeholder,
}

macro_rules! text_keys {
    (
        page { $($page:ident($id:literal, $slot:ident) => $page_en:literal, $page_ar:literal;)* }
        messages { $($msg:ident => $msg_en:literal, $msg_ar:literal;)* }
    ) => {
        /// Identifies a localized string.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TextKey {
            $($page,)*
            $($msg,)*
        }

        impl TextKey {
            /// Keys of the strings shown by page elements, in document order.
            pub const PAGE: &'static [TextKey] = &[$(Self::$page,)*];

            /// Id and slot of the page element showing this text, `None` for
            /// status messages.
            pub fn element(self) -> Option<(&'static str, Slot)> {
                match self {
                    $(Self::$page => Some(($id, Slot::$slot)),)*
                    $(Self::$msg => None,)*
                }
            }

            pub fn text(self, language: Language) -> &'static str {
                match (self, language) {
                    $(
                        (Self::$page, Language::En) => $page_en,
                        (Self::$page, Language::Ar) => $page_ar,
                    )*
                    $(
                        (Self::$msg, Language::En) => $msg_en,
                        (Self::$msg, Language::Ar) => $msg_ar,
                    )*
                }
            }
        }
    };
}

text_keys! {
    page {
        Title("pageTitle", Text) => "Visit Tyre", "زوروا صور";
        HeroTitle("heroTitle", Text) => "Tyre, the Queen of the Seas", "صور، ملكة البحار";
        HeroSubtitle("heroSubtitle", Text)
            => "Beaches, Roman ruins and the old souk on the southern coast of Lebanon.",
               "شواطئ وآثار رومانية وسوق قديم على الساحل الجنوبي للبنان.";
        HeroNote("heroNote", Text)
            => "Tip: start early, the ruins get hot around noon.",
               "نصيحة: ابدأوا باكراً، فالآثار تصبح حارة عند الظهر.";
        DirectionsFromBeirut("btnBeirutToTyre", Text) => "Directions from Beirut", "الاتجاهات من بيروت";
        OpenStreetMap("btnOSMTyre", Text) => "Open in OpenStreetMap", "افتح في OpenStreetMap";
        CenterTyre("centerTyre", Text) => "Center", "المركز";
        GoBeach("goBeach", Text) => "Beach", "الشاطئ";
        GoRuins("goRuins", Text) => "Ruins", "الآثار";
        PlanVisit("planVisit", Text) => "Plan your visit", "خطط لزيارتك";
        PlanVisitBody("planVisitBody", Text)
            => "Tyre is about 80 km south of Beirut, roughly 1.5 hours by car.",
               "تبعد صور حوالي 80 كم جنوب بيروت، أي نحو ساعة ونصف بالسيارة.";
        ContactTitle("contactTitle", Text) => "Contact us", "تواصل معنا";
        NamePlaceholder("contactName", Placeholder) => "Your name", "اسمك";
        MobilePlaceholder("contactMobile", Placeholder) => "Mobile number", "رقم الهاتف";
        EmailPlaceholder("contactEmail", Placeholder) => "Email address", "البريد الإلكتروني";
        MessagePlaceholder("contactMessage", Placeholder) => "Your message", "رسالتك";
        Submit("contactSubmit", Text) => "Send", "إرسال";
        LanguageToggle("langToggle", Text) => "العربية", "English";
    }
    messages {
        Sent => "Message sent successfully ✅", "تم إرسال الرسالة بنجاح ✅";
        SendFailed => "Failed to send. Please try again.", "تعذر الإرسال. يرجى المحاولة مرة أخرى.";
        SomethingWentWrong => "Something went wrong.", "حدث خطأ ما.";
        FillRequired => "Please fill in all required fields.", "يرجى تعبئة جميع الحقول المطلوبة.";
        Received
            => "Thank you {name}! We received your message and will reply to {email}.",
               "شكراً {name}! لقد استلمنا رسالتك وسنرد على {email}.";
        ErrorName => "Name is required.", "الاسم مطلوب.";
        ErrorMobile => "Mobile number is required.", "رقم الهاتف مطلوب.";
        ErrorEmail => "Valid email is required.", "بريد إلكتروني صالح مطلوب.";
        ErrorMessage => "Message is required.", "الرسالة مطلوبة.";
    }
}
