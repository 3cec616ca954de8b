use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, Result};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 14;

/// Caller-supplied trip parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelInputs {
    pub destination: String,
    pub days: u32,
    pub style: TravelStyle,
}

impl TravelInputs {
    pub fn new(destination: impl Into<String>, days: u32, style: TravelStyle) -> Self {
        Self {
            destination: destination.into(),
            days,
            style,
        }
    }

    /// Reject inputs the request builder cannot turn into a sensible prompt.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(ContractError::InvalidInput(
                "destination must not be empty".to_string(),
            ));
        }

        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            return Err(ContractError::InvalidInput(format!(
                "days must be between {} and {}, got {}",
                MIN_DAYS, MAX_DAYS, self.days
            )));
        }

        Ok(())
    }
}

/// The fixed set of travel styles offered to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelStyle {
    #[default]
    #[serde(rename = "힐링/휴양")]
    Healing,
    #[serde(rename = "관광/명소")]
    Sightseeing,
    #[serde(rename = "미식/맛집")]
    Gourmet,
    #[serde(rename = "쇼핑/도시")]
    Shopping,
    #[serde(rename = "액티비티/운동")]
    Activity,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 5] = [
        TravelStyle::Healing,
        TravelStyle::Sightseeing,
        TravelStyle::Gourmet,
        TravelStyle::Shopping,
        TravelStyle::Activity,
    ];

    /// Label embedded in prompts and shown to users
    pub fn label(&self) -> &'static str {
        match self {
            TravelStyle::Healing => "힐링/휴양",
            TravelStyle::Sightseeing => "관광/명소",
            TravelStyle::Gourmet => "미식/맛집",
            TravelStyle::Shopping => "쇼핑/도시",
            TravelStyle::Activity => "액티비티/운동",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            TravelStyle::Healing => "healing",
            TravelStyle::Sightseeing => "sightseeing",
            TravelStyle::Gourmet => "gourmet",
            TravelStyle::Shopping => "shopping",
            TravelStyle::Activity => "activity",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TravelStyle {
    type Err = ContractError;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        TravelStyle::ALL
            .into_iter()
            .find(|style| style.label() == value || style.key().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                ContractError::InvalidInput(format!("unknown travel style `{}`", value))
            })
    }
}

/// Output language and currency requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Korean,
    English,
}

impl Locale {
    pub fn language(&self) -> &'static str {
        match self {
            Locale::Korean => "한국어",
            Locale::English => "English",
        }
    }

    /// ISO 4217 code all monetary values are expressed in
    pub fn currency(&self) -> &'static str {
        match self {
            Locale::Korean => "KRW",
            Locale::English => "USD",
        }
    }

    /// Map service whose links the backend is asked to produce
    pub fn map_service(&self) -> &'static str {
        match self {
            Locale::Korean => "네이버 지도",
            Locale::English => "Google Maps",
        }
    }
}

impl FromStr for Locale {
    type Err = ContractError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" | "korean" => Ok(Locale::Korean),
            "en" | "en-us" | "english" => Ok(Locale::English),
            other => Err(ContractError::InvalidInput(format!(
                "unsupported locale `{}`",
                other
            ))),
        }
    }
}
