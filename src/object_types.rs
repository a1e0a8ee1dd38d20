// 🗂️ Configuration types - the fixed set of exports we recognize
// Folder names are dictated by the export tool and must match exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ConfigType - one recognized export folder
///
/// Declaration order is the sheet order of the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfigType {
    #[serde(rename = "WSACfgAccrualCode")]
    AccrualCode,
    #[serde(rename = "WSAHoliday")]
    Holiday,
    #[serde(rename = "APIHolidayProfile")]
    HolidayProfile,
    #[serde(rename = "WSAHolidayCreditRule")]
    HolidayCreditRule,
    #[serde(rename = "WSAPayCode")]
    PayCode,
    #[serde(rename = "WSAContributingPayCodeRule")]
    ContributingPayCodeRule,
    #[serde(rename = "WSAContributingShiftRule")]
    ContributingShiftRule,
    #[serde(rename = "WSABalanceCascade")]
    BalanceCascade,
    #[serde(rename = "WSABalanceCascadeGroup")]
    BalanceCascadeGroup,
    #[serde(rename = "WSALimit")]
    Limit,
    #[serde(rename = "WSADatePattern")]
    DatePattern,
    #[serde(rename = "WSACustomDate")]
    CustomDate,
    #[serde(rename = "EmploymentTerm")]
    EmploymentTerm,
    #[serde(rename = "WSAAccrualPolicy")]
    AccrualPolicy,
    #[serde(rename = "WSAAccrualProfile")]
    AccrualProfile,
}

impl ConfigType {
    pub const ALL: [ConfigType; 15] = [
        ConfigType::AccrualCode,
        ConfigType::Holiday,
        ConfigType::HolidayProfile,
        ConfigType::HolidayCreditRule,
        ConfigType::PayCode,
        ConfigType::ContributingPayCodeRule,
        ConfigType::ContributingShiftRule,
        ConfigType::BalanceCascade,
        ConfigType::BalanceCascadeGroup,
        ConfigType::Limit,
        ConfigType::DatePattern,
        ConfigType::CustomDate,
        ConfigType::EmploymentTerm,
        ConfigType::AccrualPolicy,
        ConfigType::AccrualProfile,
    ];

    /// Export folder name; also the key of the object node inside the export
    pub fn folder_name(&self) -> &'static str {
        match self {
            ConfigType::AccrualCode => "WSACfgAccrualCode",
            ConfigType::Holiday => "WSAHoliday",
            ConfigType::HolidayProfile => "APIHolidayProfile",
            ConfigType::HolidayCreditRule => "WSAHolidayCreditRule",
            ConfigType::PayCode => "WSAPayCode",
            ConfigType::ContributingPayCodeRule => "WSAContributingPayCodeRule",
            ConfigType::ContributingShiftRule => "WSAContributingShiftRule",
            ConfigType::BalanceCascade => "WSABalanceCascade",
            ConfigType::BalanceCascadeGroup => "WSABalanceCascadeGroup",
            ConfigType::Limit => "WSALimit",
            ConfigType::DatePattern => "WSADatePattern",
            ConfigType::CustomDate => "WSACustomDate",
            ConfigType::EmploymentTerm => "EmploymentTerm",
            ConfigType::AccrualPolicy => "WSAAccrualPolicy",
            ConfigType::AccrualProfile => "WSAAccrualProfile",
        }
    }

    pub fn object_key(&self) -> &'static str {
        self.folder_name()
    }

    /// Human-readable sheet title
    pub fn sheet_title(&self) -> &'static str {
        match self {
            ConfigType::AccrualCode => "Accrual Codes",
            ConfigType::Holiday => "Holidays",
            ConfigType::HolidayProfile => "Holiday Profiles",
            ConfigType::HolidayCreditRule => "Holiday Credit Rules",
            ConfigType::PayCode => "Pay Codes",
            ConfigType::ContributingPayCodeRule => "Contrib Pay Code Rules",
            ConfigType::ContributingShiftRule => "Contrib Shift Rules",
            ConfigType::BalanceCascade => "Balance Cascades",
            ConfigType::BalanceCascadeGroup => "Balance Cascade Groups",
            ConfigType::Limit => "Limits",
            ConfigType::DatePattern => "Date Patterns",
            ConfigType::CustomDate => "Custom Dates",
            ConfigType::EmploymentTerm => "Employment Terms",
            ConfigType::AccrualPolicy => "Accrual Policies",
            ConfigType::AccrualProfile => "Accrual Profiles",
        }
    }

    /// Match an export folder name (exact, case-sensitive)
    pub fn from_folder(folder: &str) -> Option<ConfigType> {
        ConfigType::ALL
            .iter()
            .copied()
            .find(|t| t.folder_name() == folder)
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}
