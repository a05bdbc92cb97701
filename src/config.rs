use serde::{Deserialize, Serialize};

/// Fallback route endpoints used when the configuration does not override
/// them (Milano Centrale and Reggio Emilia AV).
pub const DEFAULT_DEPARTURE_LOCATION_ID: i64 = 830000219;
pub const DEFAULT_ARRIVAL_LOCATION_ID: i64 = 830011145;

const DEFAULT_CHECK_INTERVAL_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Journey-search endpoint the watcher posts requests to.
    pub api_url: String,
    pub departure_location_id: Option<i64>,
    pub arrival_location_id: Option<i64>,
    /// Comma-separated travel dates to watch, e.g. "2024-06-01,2024-06-02".
    pub dates_to_check: String,
    /// Comma-separated train category codes, e.g. "FR,IC".
    pub train_categories: String,
    /// Comma-separated train denominations, e.g. "Frecciarossa".
    pub denominations: String,
    /// Comma-separated email addresses to notify.
    pub email_recipients: String,
    pub check_interval_seconds: u64,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// HTTP endpoint of the mail provider's send API.
    pub api_url: String,
    pub api_token: String,
    pub from: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url:
                "https://www.lefrecce.it/Channels.Website.BFF.WEB/website/ticket/solutions"
                    .to_string(),
            departure_location_id: None,
            arrival_location_id: None,
            dates_to_check: "2024-06-01,2024-06-02".to_string(),
            train_categories: "FR".to_string(),
            denominations: "Frecciarossa".to_string(),
            email_recipients: "you@example.com".to_string(),
            check_interval_seconds: DEFAULT_CHECK_INTERVAL_SECONDS,
            mail: MailConfig::default(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            api_url: String::new(),
            api_token: String::new(),
            from: "\"Train Scraper\" <noreply@example.com>".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The per-run view of the configuration: the four watch lists split out
    /// of their comma-separated form plus the resolved route. Taken fresh at
    /// the start of every cycle so edits to the file apply without a restart.
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            dates: split_list(&self.dates_to_check),
            categories: split_list(&self.train_categories),
            denominations: split_list(&self.denominations),
            recipients: split_list(&self.email_recipients),
            route: RouteConfig {
                departure_location_id: self
                    .departure_location_id
                    .unwrap_or(DEFAULT_DEPARTURE_LOCATION_ID),
                arrival_location_id: self
                    .arrival_location_id
                    .unwrap_or(DEFAULT_ARRIVAL_LOCATION_ID),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSnapshot {
    pub dates: Vec<String>,
    pub categories: Vec<String>,
    pub denominations: Vec<String>,
    pub recipients: Vec<String>,
    pub route: RouteConfig,
}

impl RunSnapshot {
    /// A run needs all four lists; an empty one means the cycle is skipped.
    pub fn is_complete(&self) -> bool {
        !self.dates.is_empty()
            && !self.categories.is_empty()
            && !self.denominations.is_empty()
            && !self.recipients.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub departure_location_id: i64,
    pub arrival_location_id: i64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        RouteConfig {
            departure_location_id: DEFAULT_DEPARTURE_LOCATION_ID,
            arrival_location_id: DEFAULT_ARRIVAL_LOCATION_ID,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
