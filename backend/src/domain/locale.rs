//! Supported UI locales and text direction.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Locale of a rendered view. Every route is prefixed with its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Locale {
    /// English, left-to-right.
    En,
    /// Arabic, right-to-left.
    Ar,
}

/// Writing direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
}

impl TextDirection {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// A locale code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale `{code}`")]
pub struct LocaleError {
    /// Rejected code.
    pub code: String,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    /// Locale used when the path carries none.
    pub const DEFAULT: Self = Self::En;

    /// Route prefix and catalog file stem.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Writing direction; Arabic is right-to-left.
    #[must_use]
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }

    /// The locale the language switcher offers.
    #[must_use]
    pub const fn alternate(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    /// Name of the locale in its own language, shown on the switcher.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }

    /// Rewrite `path` so its locale prefix names `self`.
    ///
    /// Paths without a known locale prefix get one prepended. A query string
    /// is kept as is.
    ///
    /// # Examples
    /// ```
    /// use user_admin::domain::Locale;
    ///
    /// assert_eq!(Locale::Ar.switch_path("/en/users/4/edit"), "/ar/users/4/edit");
    /// assert_eq!(Locale::En.switch_path("/ar"), "/en");
    /// assert_eq!(Locale::Ar.switch_path("/"), "/ar");
    /// assert_eq!(Locale::Ar.switch_path("/en?page=2"), "/ar?page=2");
    /// ```
    #[must_use]
    pub fn switch_path(self, path: &str) -> String {
        if let Some((route, query)) = path.split_once('?') {
            return format!("{}?{query}", self.switch_path(route));
        }
        let trimmed = path.trim_start_matches('/');
        let (head, rest) = trimmed.split_once('/').map_or((trimmed, ""), |(h, r)| (h, r));
        let tail = if head.parse::<Self>().is_ok() {
            rest
        } else {
            trimmed
        };
        if tail.is_empty() {
            format!("/{}", self.code())
        } else {
            format!("/{}/{tail}", self.code())
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == s)
            .ok_or_else(|| LocaleError { code: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", Locale::En, TextDirection::Ltr)]
    #[case("ar", Locale::Ar, TextDirection::Rtl)]
    fn parses_supported_codes(
        #[case] code: &str,
        #[case] expected: Locale,
        #[case] direction: TextDirection,
    ) {
        let locale: Locale = code.parse().expect("supported");
        assert_eq!(locale, expected);
        assert_eq!(locale.direction(), direction);
    }

    #[rstest]
    #[case("fr")]
    #[case("EN")]
    #[case("")]
    fn rejects_unknown_codes(#[case] code: &str) {
        assert_eq!(
            code.parse::<Locale>(),
            Err(LocaleError {
                code: code.to_owned()
            })
        );
    }

    #[rstest]
    #[case(Locale::Ar, "/en", "/ar")]
    #[case(Locale::En, "/ar/users/create", "/en/users/create")]
    #[case(Locale::Ar, "/users/3", "/ar/users/3")]
    #[case(Locale::En, "/en", "/en")]
    fn switch_path_swaps_prefix(#[case] target: Locale, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(target.switch_path(path), expected);
    }

    #[test]
    fn alternate_toggles() {
        assert_eq!(Locale::En.alternate(), Locale::Ar);
        assert_eq!(Locale::Ar.alternate().alternate(), Locale::Ar);
    }
}
