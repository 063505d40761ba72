//! Entity category enumeration
//!
//! Categories are a closed set: every stage of the pipeline (clustering,
//! id minting, substitution, counts) dispatches over them exhaustively.
//! Per-category behavior lives here so the algorithms stay generic.

use crate::domain::errors::CloakError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How detected strings of a category are turned into clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Fuzzy clustering over name-normalized strings, with the validity
    /// filter and the abbreviation post-merge.
    NameVariants,
    /// Fuzzy clustering over number-normalized strings.
    NumberVariants,
    /// Every distinct string becomes its own single-variant cluster.
    Verbatim,
}

/// Category of a pseudonymized entity
///
/// Declaration order is the canonical output order: serialized
/// replacement files, counts displays, and id minting all iterate
/// categories in this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityCategory {
    /// Person names (full names, initials, spelling variants)
    Person,
    /// Email addresses
    Email,
    /// Free-form street addresses and place names
    Location,
    /// Phone-like digit groups
    PhoneNumber,
    /// Date-like numeric strings
    DateNumber,
    /// Letter-prefixed identifier codes
    IdNumber,
    /// Grouped account/code numbers
    CodeNumber,
    /// Digit-dense sequences with no more specific shape
    GeneralNumber,
    /// National identity numbers
    NationalId,
}

impl EntityCategory {
    /// All categories, in canonical order.
    pub const ALL: [EntityCategory; 9] = [
        EntityCategory::Person,
        EntityCategory::Email,
        EntityCategory::Location,
        EntityCategory::PhoneNumber,
        EntityCategory::DateNumber,
        EntityCategory::IdNumber,
        EntityCategory::CodeNumber,
        EntityCategory::GeneralNumber,
        EntityCategory::NationalId,
    ];

    /// Label used in replacement ids and as the key in persisted
    /// replacement files (`<PERSON_1>`, `PERSON:` ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Email => "EMAIL_ADDRESS",
            Self::Location => "LOCATION",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::DateNumber => "DATE_NUMBER",
            Self::IdNumber => "ID_NUMBER",
            Self::CodeNumber => "CODE_NUMBER",
            Self::GeneralNumber => "GENERAL_NUMBER",
            Self::NationalId => "NATIONAL_ID",
        }
    }

    /// Key stem for the flat counts mapping (`person_found`,
    /// `person_replaced`, ...).
    pub fn count_key(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Email => "email_address",
            Self::Location => "location",
            Self::PhoneNumber => "phone_number",
            Self::DateNumber => "date_number",
            Self::IdNumber => "id_number",
            Self::CodeNumber => "code_number",
            Self::GeneralNumber => "general_number",
            Self::NationalId => "national_id",
        }
    }

    /// Parses an exact category label, as found in persisted replacement
    /// files. Unknown labels are a configuration error, never skipped.
    ///
    /// # Errors
    ///
    /// Returns `CloakError::Configuration` for any string that is not a
    /// known label.
    pub fn from_label(s: &str) -> Result<Self> {
        match s {
            "PERSON" => Ok(Self::Person),
            "EMAIL_ADDRESS" => Ok(Self::Email),
            "LOCATION" => Ok(Self::Location),
            "PHONE_NUMBER" => Ok(Self::PhoneNumber),
            "DATE_NUMBER" => Ok(Self::DateNumber),
            "ID_NUMBER" => Ok(Self::IdNumber),
            "CODE_NUMBER" => Ok(Self::CodeNumber),
            "GENERAL_NUMBER" => Ok(Self::GeneralNumber),
            "NATIONAL_ID" => Ok(Self::NationalId),
            _ => Err(CloakError::Configuration(format!(
                "Unknown entity category: {s}"
            ))),
        }
    }

    /// Maps a recognizer span label onto a category.
    ///
    /// Recognizer labels are an open vocabulary (different recognizers
    /// emit different names for the same thing), so unlike
    /// [`from_label`](Self::from_label) this accepts aliases and returns
    /// `None` for labels the pipeline does not track.
    pub fn from_recognizer_label(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PERSON" | "PER" | "NAME" => Some(Self::Person),
            "EMAIL_ADDRESS" | "EMAIL" => Some(Self::Email),
            "LOCATION" | "ADDRESS" | "US_ADDRESS" | "GPE" | "LOC" => Some(Self::Location),
            "PHONE_NUMBER" | "PHONE" | "NUMBER_PATTERN" => Some(Self::PhoneNumber),
            "DATE_NUMBER" | "DATE" | "DATE_TIME" => Some(Self::DateNumber),
            "ID_NUMBER" => Some(Self::IdNumber),
            "CODE_NUMBER" => Some(Self::CodeNumber),
            "GENERAL_NUMBER" | "NUMBER" | "DIGIT_SEQUENCE" => Some(Self::GeneralNumber),
            "NATIONAL_ID" | "CPR_NUMBER" | "SSN" => Some(Self::NationalId),
            _ => None,
        }
    }

    /// How detected strings of this category are grouped into entities.
    ///
    /// Emails, locations, and national ids are exact-match identifiers:
    /// fuzzy-grouping two different addresses would conflate distinct
    /// referents, so each string stands alone.
    pub fn grouping(&self) -> Grouping {
        match self {
            Self::Person => Grouping::NameVariants,
            Self::PhoneNumber
            | Self::DateNumber
            | Self::IdNumber
            | Self::CodeNumber
            | Self::GeneralNumber => Grouping::NumberVariants,
            Self::Email | Self::Location | Self::NationalId => Grouping::Verbatim,
        }
    }

    /// Default clustering threshold, for categories that cluster.
    ///
    /// Dates are stricter than other numbers so that near-identical but
    /// distinct dates keep separate entities.
    pub fn default_threshold(&self) -> Option<f64> {
        match self.grouping() {
            Grouping::NameVariants => Some(85.0),
            Grouping::NumberVariants => match self {
                Self::DateNumber => Some(95.0),
                _ => Some(80.0),
            },
            Grouping::Verbatim => None,
        }
    }

    /// Whether replacement ids for this category are quoted when the
    /// output policy enables quoting of numeric ids.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::PhoneNumber
                | Self::DateNumber
                | Self::IdNumber
                | Self::CodeNumber
                | Self::GeneralNumber
                | Self::NationalId
        )
    }

    /// Whether variants of this category match with word-boundary
    /// delimiters. Free-form location strings may begin or end with
    /// punctuation that breaks word-boundary semantics, so they always
    /// match as plain literals.
    pub fn word_bounded(&self) -> bool {
        !matches!(self, Self::Location)
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
