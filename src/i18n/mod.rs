//! Locale support for display strings

use std::fmt;
use std::str::FromStr;

const PT_BR_MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const PT_BR_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese
    #[default]
    PtBr,
    /// English
    En,
}

/// UI strings that vary by locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    LoadMore,
    Minutes,
    NotFound,
}

impl Locale {
    /// Resolve a configured language tag, falling back to `pt-BR`
    pub fn from_language(language: &str) -> Self {
        match language.parse() {
            Ok(locale) => locale,
            Err(_) => {
                tracing::warn!("Unsupported language {:?}, falling back to pt-BR", language);
                Locale::default()
            }
        }
    }

    /// BCP 47 tag for the `lang` attribute
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        }
    }

    /// Full month name, `month` in 1..=12
    pub fn month_name(&self, month: u32) -> &'static str {
        let names = match self {
            Locale::PtBr => &PT_BR_MONTHS,
            Locale::En => &EN_MONTHS,
        };
        names[month_index(month)]
    }

    /// Abbreviated month name, `month` in 1..=12
    pub fn month_abbr(&self, month: u32) -> &'static str {
        let names = match self {
            Locale::PtBr => &PT_BR_MONTHS_SHORT,
            Locale::En => &EN_MONTHS_SHORT,
        };
        names[month_index(month)]
    }

    /// Translate a UI label
    pub fn label(&self, label: Label) -> &'static str {
        match (self, label) {
            (Locale::PtBr, Label::LoadMore) => "Carregar mais posts",
            (Locale::PtBr, Label::Minutes) => "min",
            (Locale::PtBr, Label::NotFound) => "Post não encontrado",
            (Locale::En, Label::LoadMore) => "Load more posts",
            (Locale::En, Label::Minutes) => "min",
            (Locale::En, Label::NotFound) => "Post not found",
        }
    }
}

fn month_index(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s.trim().to_ascii_lowercase().replace('_', "-");
        match lang.split('-').next().unwrap_or_default() {
            "pt" => Ok(Locale::PtBr),
            "en" => Ok(Locale::En),
            _ => Err(format!("unsupported language: {}", s)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_tags() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("pt_br".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("zh-CN".parse::<Locale>().is_err());
    }

    #[test]
    fn test_unknown_language_falls_back() {
        assert_eq!(Locale::from_language("klingon"), Locale::PtBr);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Locale::PtBr.month_abbr(4), "Abr");
        assert_eq!(Locale::En.month_abbr(4), "Apr");
        assert_eq!(Locale::PtBr.month_name(3), "Março");
        assert_eq!(Locale::En.month_name(12), "December");
    }
}
