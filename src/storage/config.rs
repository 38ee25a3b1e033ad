use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar::{CalendarDate, DateBounds, SelectType};
use crate::selection::ViewState;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub dots: DotsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<CalendarDate>,
    #[serde(default = "default_today_selected")]
    pub today_selected: bool,
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectTypeName {
    #[default]
    OneDay,
    DayRange,
    WeekRange,
    MonthRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SelectionConfig {
    #[serde(default)]
    pub select_type: SelectTypeName,
    #[serde(default)]
    pub select_limit_day: u32,
    #[serde(default)]
    pub select_limit_week: u32,
    #[serde(default)]
    pub select_limit_month: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DotsConfig {
    #[serde(default)]
    pub dates: Vec<CalendarDate>,
}

fn default_today_selected() -> bool {
    true
}

fn default_first_day_of_week() -> String {
    "Sunday".to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            today_selected: default_today_selected(),
            first_day_of_week: default_first_day_of_week(),
        }
    }
}

impl SelectionConfig {
    /// Limits of 0 mean unlimited.
    pub fn select_type(&self) -> SelectType {
        match self.select_type {
            SelectTypeName::OneDay => SelectType::OneDay,
            SelectTypeName::DayRange => SelectType::day_range(Some(self.select_limit_day)),
            SelectTypeName::WeekRange => SelectType::week_range(Some(self.select_limit_week)),
            SelectTypeName::MonthRange => SelectType::month_range(Some(self.select_limit_month)),
        }
    }
}

impl CalendarConfig {
    pub fn week_start(&self) -> Result<Weekday, ConfigError> {
        match self.first_day_of_week.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sun),
            "monday" | "mon" => Ok(Weekday::Mon),
            other => Err(ConfigError::InvalidValue(format!(
                "first_day_of_week must be Sunday or Monday, got '{}'",
                other
            ))),
        }
    }

    pub fn bounds(&self) -> Result<DateBounds, ConfigError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(ConfigError::InvalidValue(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
        Ok(DateBounds::new(self.start_date, self.end_date))
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calpick")
            .join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Initial picker state described by this config, with an empty
    /// selection.
    pub fn view_state(&self) -> Result<ViewState, ConfigError> {
        let bounds = self.calendar.bounds()?;
        let week_start = self.calendar.week_start()?;

        Ok(ViewState::new(self.selection.select_type())
            .with_bounds(bounds)
            .with_week_start(week_start)
            .with_today_selected(self.calendar.today_selected))
    }
}
