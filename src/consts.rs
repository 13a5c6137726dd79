/// Minimum supported proleptic year (inclusive)
pub const MIN_YEAR: i32 = -999_998;

/// Maximum supported proleptic year (inclusive)
pub const MAX_YEAR: i32 = 999_999;

/// First month of any year, used for lower bounds
pub const MIN_MONTH: u8 = 1;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Number of months in an International Fixed year
pub const IFC_MONTHS_PER_YEAR: u8 = 13;

/// Length of months 1 through 12 in the International Fixed calendar
pub const IFC_DAYS_IN_STANDARD_MONTH: u8 = 28;

/// Length of the closing month in a common year
pub const IFC_CLOSING_MONTH_DAYS: u8 = 29;

/// Length of the closing month in a leap year
pub const IFC_CLOSING_MONTH_DAYS_LEAP: u8 = 30;

/// Number of months in an ISO year
pub const ISO_MONTHS_PER_YEAR: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in each ISO month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const ISO_DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: u16 = 365;

/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Seconds in a (leap-second free) day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Year containing epoch day 0
pub const EPOCH_YEAR: i32 = 1970;

/// Days from 0001-01-01 to 1970-01-01 in the proleptic Gregorian calendar
pub(crate) const DAYS_0001_TO_1970: i64 = 719_162;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;
/// Days in one full 400 year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: i64 = 146_097;

/// Largest accepted zone offset magnitude (18 hours)
pub const MAX_OFFSET_SECONDS: i32 = 18 * 3_600;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator between the chronology id and the date
pub const CHRONOLOGY_SEPARATOR: char = ' ';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
