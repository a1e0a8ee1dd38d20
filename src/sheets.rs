// 📋 Sheet Columns - declared per config type
//
// Each type sheet is a list of (header, how to read the cell). Sheets never
// look at raw JSON directly; they go through ConfigObject's path accessors.

use crate::catalog::Catalog;
use crate::object::{render_scalar, ConfigObject};
use crate::object_types::ConfigType;
use crate::report::Sheet;

pub const PROFILE_DETAILS_TITLE: &str = "Holiday Profile Details";

const PROFILE_ENTRIES: &str = "HolidayProfileDataSet.APIHolidayProfileDataSet.DataMembers.APIHolidayProfileData.Entries.APIHolidayProfileDataEntry";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// The catalog name
    Name,
    /// First non-empty value at the path
    Attr(&'static str),
    /// Number of entries at the path
    Count(&'static str),
    /// All values joined with ", "
    Join(&'static str),
    /// First n values joined, "..." appended when truncated
    JoinAtMost(&'static str, usize),
    EarliestDate(&'static str),
    LatestDate(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub kind: ColumnKind,
}

const fn col(header: &'static str, kind: ColumnKind) -> Column {
    Column { header, kind }
}

const fn attr(header: &'static str, path: &'static str) -> Column {
    col(header, ColumnKind::Attr(path))
}

const NAME: Column = col("Name", ColumnKind::Name);

impl Column {
    pub fn cell(&self, object: &ConfigObject) -> String {
        match self.kind {
            ColumnKind::Name => object.name.clone(),
            ColumnKind::Attr(path) => object.text(path),
            ColumnKind::Count(path) => object.count(path).to_string(),
            ColumnKind::Join(path) => object.texts(path).join(", "),
            ColumnKind::JoinAtMost(path, limit) => {
                let values = object.texts(path);
                let mut cell = values
                    .iter()
                    .take(limit)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                if values.len() > limit {
                    cell.push_str("...");
                }
                cell
            }
            ColumnKind::EarliestDate(path) => format_date(object.dates(path).into_iter().min()),
            ColumnKind::LatestDate(path) => format_date(object.dates(path).into_iter().max()),
        }
    }
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ============================================================================
// COLUMN TABLES
// ============================================================================

const ACCRUAL_CODE_COLUMNS: &[Column] = &[
    NAME,
    attr("Abbreviation", "@Abbreviation"),
    attr("Type", "@Type"),
    attr("Hours Per Day", "@HoursPerDay"),
    attr("Manual Edit", "@ManualEdit"),
    attr("Display", "@Display"),
    attr("Tracking Period", "@TrackingPeriodName"),
];

const HOLIDAY_COLUMNS: &[Column] = &[
    NAME,
    attr("Display Name", "@DisplayName"),
    col("Date Count", ColumnKind::Count("WSAHolidayDates.WSAHolidayDate")),
    col(
        "First Date",
        ColumnKind::EarliestDate("WSAHolidayDates.WSAHolidayDate.@StartDate"),
    ),
    col(
        "Last Date",
        ColumnKind::LatestDate("WSAHolidayDates.WSAHolidayDate.@StartDate"),
    ),
];

const HOLIDAY_PROFILE_COLUMNS: &[Column] = &[
    col("Profile Name", ColumnKind::Name),
    attr("Active", "@Active"),
    attr(
        "Default Zone Rule",
        "HolidayProfileDataSet.APIHolidayProfileDataSet.DataMembers.APIHolidayProfileData.@DefaultZoneRuleName",
    ),
    attr(
        "Default Credit Rule",
        "HolidayProfileDataSet.APIHolidayProfileDataSet.DataMembers.APIHolidayProfileData.@DefaultCreditRuleName",
    ),
    col("Holiday Count", ColumnKind::Count(PROFILE_ENTRIES)),
];

const HOLIDAY_CREDIT_RULE_COLUMNS: &[Column] = &[
    NAME,
    attr("Before Holiday", "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@BeforeHolidaySwitch"),
    attr("After Holiday", "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@AfterHolidaySwitch"),
    attr("On Holiday", "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@OnHolidaySwitch"),
    attr(
        "Either Before/After",
        "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@EitherBeforeOrAfterHolidaySwitch",
    ),
    attr("Must Satisfy All", "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@MustSatisfyAllSwitch"),
    attr(
        "Scheduled Shift Check",
        "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@ScheduledShiftTypeSwitch",
    ),
    attr(
        "Alternate Rule",
        "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@AlternateHolidayCreditRuleName",
    ),
    attr("Contributing Shift", "WSACreditCalculator.WSACreditCalculator.@ContributingShiftName"),
    attr("Credit Type", "WSACreditCalculator.WSACreditCalculator.@Type"),
    attr("Fixed Amount", "WSACreditCalculator.WSACreditCalculator.@CreditFixedAmount"),
    attr("Max Amount", "WSACreditCalculator.WSACreditCalculator.@MaxAmount"),
    attr("Wage Calculation", "WSACreditCalculator.WSACreditCalculator.@WageCalculation"),
    attr("As If Worked", "WSACreditCalculator.WSACreditCalculator.@AsIfWorkedSwitch"),
    col(
        "Credit Pay Code",
        ColumnKind::Join("WSACreditCalculator.WSACreditCalculator.CreditPayCodeNames.SimpleValue"),
    ),
    attr("OT Limit Pay Code", "@OvertimeLimitPayCodeName"),
    attr("Day OT Limit Pay Code", "@DayOvertimeLimitPayCodeName"),
    attr("OT Limit Type", "@OvertimeLimitType"),
];

const PAY_CODE_COLUMNS: &[Column] = &[
    NAME,
    attr("Type", "@Type"),
    attr("Amount Type", "@AmountType"),
    attr("Visible To User", "@VisibleToUser"),
    attr("Visible In Report", "@VisibleInReport"),
    attr("Visible In Main Area", "@VisibleInMainArea"),
    attr("Timekeeping Only", "@TimekeepingOnly"),
    attr("Payroll Only", "@PayrollOnly"),
    attr("Edit Cnt To OT", "@EditCntToOt"),
    attr("Edit Affect Shift Total", "@EditAffShfTotal"),
    attr("Edit Excuse Absence", "@EditExcuseAbsn"),
    attr("Schedule Hours Type", "@ScheduleHoursType"),
    attr("Wage Multiply", "@WageMultiply"),
    attr("Wage Addition", "@WageAddition"),
];

const CONTRIBUTING_PAY_CODE_RULE_COLUMNS: &[Column] = &[
    NAME,
    attr("Is Prep Payroll", "@IsPrepPayrollSw"),
    attr("Is Contribute Shift", "@IsContributeShftSw"),
    col("Pay Codes", ColumnKind::Join("PayCodeNames.SimpleValue")),
];

const CONTRIBUTING_SHIFT_RULE_COLUMNS: &[Column] = &[
    NAME,
    attr("Contributing Pay Code Rule", "@ContributingPayCodeRuleName"),
    attr("Look Back Type", "@LookBackType"),
    attr("Look Back Time", "@LookBackTime"),
    attr("Look Back Unit", "@LookBackUnit"),
    attr("Days Of Week Include Type", "@DaysOfWeekIncludeType"),
    attr("Minimum Shift Length", "@MinimumShiftLength"),
    attr("Include Complete Period", "@IncludeCompletePeriod"),
];

const BALANCE_CASCADE_COLUMNS: &[Column] = &[
    NAME,
    attr("Accrual Code", "@AccrualCode"),
    attr("Description", "@Description"),
    attr("Date Pattern", "@DatePattern"),
    attr("Type", "@Type"),
    attr("Fixed Amount", "@FixedAmount"),
    attr("Reduce To Zero", "@ReduceToZero"),
    col(
        "Payout To Pay Code",
        ColumnKind::Join("BalanceCascadeItems.WSABalanceCascadeItem.@PayoutToPayCode"),
    ),
    col(
        "Deduct From",
        ColumnKind::Join("BalanceCascadeItems.WSABalanceCascadeItem.@DeductFrom"),
    ),
    col(
        "Transfer To Accrual",
        ColumnKind::Join("BalanceCascadeItems.WSABalanceCascadeItem.@TransferToAccrualCode"),
    ),
];

const BALANCE_CASCADE_GROUP_COLUMNS: &[Column] = &[
    NAME,
    attr("Description", "@Description"),
    col(
        "Cascade Count",
        ColumnKind::Count("SelectedBalanceCascades.WSASelectedBalanceCascades"),
    ),
    col(
        "Cascades",
        ColumnKind::Join("SelectedBalanceCascades.WSASelectedBalanceCascades.@Name"),
    ),
];

const LIMIT_COLUMNS: &[Column] = &[
    NAME,
    attr("Limit Type", "@LimitType"),
    attr("Date Pattern", "@DatePattern"),
    attr("Max Limit", "@MaxLimit"),
    attr("Forgiven Balance", "@ForgivenBalance"),
];

const DATE_PATTERN_COLUMNS: &[Column] = &[
    NAME,
    attr("Expected Hours", "@ExpectedHours"),
    attr("Offset Amount", "@OffsetAmount"),
    attr("Offset Date Name", "@OffsetDateName"),
    attr("Custom Date Type", "DateFinder.WSADateFinder.@CustomDateType"),
    attr("Date Finder Type", "DateFinder.WSADateFinder.@DateFinderType"),
    attr("Time Unit Type", "DateFinder.WSADateFinder.@TimeUnitType"),
    attr("Num Intervals", "Interval.WSAInterval.@NumIntervals"),
    attr("Interval Time Unit", "Interval.WSAInterval.@TimeUnitType"),
];

const CUSTOM_DATE_COLUMNS: &[Column] = &[
    NAME,
    attr("Date", "@Date"),
    attr("Site Wide", "@SiteWide"),
    attr("Reference Custom Date", "@ReferenceCustomDate"),
];

const EMPLOYMENT_TERM_COLUMNS: &[Column] = &[
    NAME,
    attr("Description", "@Description"),
    attr("Is Active", "@IsActive"),
    attr("Allows Inheritance", "@AllowsInheritance"),
    attr("Holiday Profile", "Versions.EmploymentTermVersion.@HolidayProfile"),
    attr("Cascade Profile", "Versions.EmploymentTermVersion.@CascadeProfile"),
    attr("Accrual Profile", "Versions.EmploymentTermVersion.@AccrualProfile"),
    attr("Time Off Rule", "Versions.EmploymentTermVersion.@TimeOffRule"),
    attr("Pay Rule", "Versions.EmploymentTermVersion.@PayRule"),
];

const ACCRUAL_POLICY_COLUMNS: &[Column] = &[
    NAME,
    attr("Accrual Code", "EffectiveAccrualPolicies.WSAEffectiveAccrualPolicy.@AccrualCode"),
    attr(
        "Payout Pay Code",
        "EffectiveAccrualPolicies.WSAEffectiveAccrualPolicy.@AccrualPayoutPayCode",
    ),
    attr("Overdraft Error", "EffectiveAccrualPolicies.WSAEffectiveAccrualPolicy.@OverdraftError"),
    attr(
        "Taking Limit",
        "EffectiveAccrualPolicies.WSAEffectiveAccrualPolicy.TakingLimits.WSAAccrualPolicyTakingLimit.@DisallowAmount",
    ),
    col(
        "Limit Rules",
        ColumnKind::Join("EffectiveAccrualPolicies.WSAEffectiveAccrualPolicy.Limits.WSAAccrualPolicyLimit.@GrantRule"),
    ),
];

const ACCRUAL_PROFILE_COLUMNS: &[Column] = &[
    NAME,
    col("Policy Count", ColumnKind::Count("AccrualPolicies.AccrualPolicyName")),
    attr("Cascade Group", "@BalanceCascadeGroupName"),
    col("Policies", ColumnKind::JoinAtMost("AccrualPolicies.AccrualPolicyName", 5)),
];

/// Column layout of a type's sheet
pub fn columns(config_type: ConfigType) -> &'static [Column] {
    match config_type {
        ConfigType::AccrualCode => ACCRUAL_CODE_COLUMNS,
        ConfigType::Holiday => HOLIDAY_COLUMNS,
        ConfigType::HolidayProfile => HOLIDAY_PROFILE_COLUMNS,
        ConfigType::HolidayCreditRule => HOLIDAY_CREDIT_RULE_COLUMNS,
        ConfigType::PayCode => PAY_CODE_COLUMNS,
        ConfigType::ContributingPayCodeRule => CONTRIBUTING_PAY_CODE_RULE_COLUMNS,
        ConfigType::ContributingShiftRule => CONTRIBUTING_SHIFT_RULE_COLUMNS,
        ConfigType::BalanceCascade => BALANCE_CASCADE_COLUMNS,
        ConfigType::BalanceCascadeGroup => BALANCE_CASCADE_GROUP_COLUMNS,
        ConfigType::Limit => LIMIT_COLUMNS,
        ConfigType::DatePattern => DATE_PATTERN_COLUMNS,
        ConfigType::CustomDate => CUSTOM_DATE_COLUMNS,
        ConfigType::EmploymentTerm => EMPLOYMENT_TERM_COLUMNS,
        ConfigType::AccrualPolicy => ACCRUAL_POLICY_COLUMNS,
        ConfigType::AccrualProfile => ACCRUAL_PROFILE_COLUMNS,
    }
}

// ============================================================================
// SHEET BUILDERS
// ============================================================================

/// One row per catalog object, in name order
pub fn type_sheet(catalog: &Catalog, config_type: ConfigType) -> Sheet {
    let columns = columns(config_type);
    let rows = catalog
        .objects_of(config_type)
        .map(|obj| columns.iter().map(|c| c.cell(obj)).collect())
        .collect();

    Sheet::new(
        config_type.sheet_title(),
        columns.iter().map(|c| c.header.to_string()).collect(),
        rows,
    )
}

const PROFILE_DETAIL_FIELDS: &[(&str, &str)] = &[
    ("Holiday Name", "@HolidayName"),
    ("Zone Rule", "@ZoneRuleName"),
    ("Credit Rule", "@CreditRuleName"),
    ("Use Default Credit", "@UseDefaultCreditRule"),
    ("Use Default Zone", "@UseDefaultZoneRule"),
];

/// One row per holiday entry of every profile
pub fn profile_details_sheet(catalog: &Catalog) -> Sheet {
    let mut headers = vec!["Profile Name".to_string()];
    headers.extend(PROFILE_DETAIL_FIELDS.iter().map(|(h, _)| h.to_string()));

    let mut rows = Vec::new();
    for profile in catalog.objects_of(ConfigType::HolidayProfile) {
        for entry in profile.values_at(PROFILE_ENTRIES) {
            let mut row = vec![profile.name.clone()];
            row.extend(
                PROFILE_DETAIL_FIELDS
                    .iter()
                    .map(|(_, key)| entry.get(*key).map(render_scalar).unwrap_or_default()),
            );
            rows.push(row);
        }
    }

    Sheet::new(PROFILE_DETAILS_TITLE, headers, rows)
}
