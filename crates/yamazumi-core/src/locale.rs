use crate::ChartConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Unknown tags fall back to English; region subtags are ignored (`zh-CN` -> `Zh`).
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("zh") {
            Self::Zh
        } else {
            Self::En
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

/// The two user-facing strings of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub no_data: String,
    pub takt: String,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        let (no_data, takt) = match locale {
            Locale::En => ("No process data", "Takt"),
            Locale::Zh => ("暂无工序数据", "节拍"),
        };
        Self {
            no_data: no_data.to_string(),
            takt: takt.to_string(),
        }
    }

    /// Locale defaults from `locale`, overridden by non-empty `labels.noData` / `labels.takt`.
    pub fn from_config(config: &ChartConfig) -> Self {
        let locale = config
            .get_str("locale")
            .map(Locale::from_tag)
            .unwrap_or_default();
        let mut labels = Self::for_locale(locale);
        if let Some(s) = config.get_str("labels.noData").filter(|s| !s.trim().is_empty()) {
            labels.no_data = s.to_string();
        }
        if let Some(s) = config.get_str("labels.takt").filter(|s| !s.trim().is_empty()) {
            labels.takt = s.to_string();
        }
        labels
    }
}
