use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeDelta;

/// Types of cell data found in a worksheet part.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as 0/1
    Boolean,
    /// Numeric values
    Number,
    /// Date/time serial numbers from the 1900 epoch
    NumberDateTime1900,
    /// Date serial numbers from the 1900 epoch
    NumberDate1900,
    /// Time serial numbers from the 1900 epoch
    NumberTime1900,
    /// Date/time serial numbers from the 1904 epoch
    NumberDateTime1904,
    /// Date serial numbers from the 1904 epoch
    NumberDate1904,
    /// Time serial numbers from the 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline and formula string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values such as `#DIV/0!`
    Error,
}

impl CellType {
    /// Maps built-in number format IDs that denote dates or times.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Classifies a custom number format code by scanning for date and time tokens
    /// outside of literals, escapes and bracketed sections.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_bracket = false;
        let mut is_date = false;
        let mut is_time = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_bracket => is_literal = true,

                ']' if is_bracket => is_bracket = false,
                '[' if !is_literal => is_bracket = true,
                _ if is_literal || is_bracket => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }
}

/// A decoded cell: its position and display text.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Cell data type as declared by the workbook
    pub kind: CellType,
    /// Cell text
    pub value: String,
}

/// Renders a raw worksheet value as text according to its cell type.
/// Date serials become ISO text; anything unparsable is kept verbatim.
pub(crate) fn render_value(kind: CellType, raw: &str) -> String {
    match kind {
        CellType::Boolean => if raw == "1" { "true" } else { "false" }.to_owned(),
        CellType::NumberDateTime1900 | CellType::NumberDateTime1904 => {
            render_serial(raw, kind == CellType::NumberDateTime1904, "%Y-%m-%d %H:%M:%S")
        }
        CellType::NumberDate1900 | CellType::NumberDate1904 => {
            render_serial(raw, kind == CellType::NumberDate1904, "%Y-%m-%d")
        }
        CellType::NumberTime1900 | CellType::NumberTime1904 => render_serial(raw, false, "%H:%M:%S"),
        CellType::IsoDateTime => raw.replace('T', " "),
        _ => raw.to_owned(),
    }
}

fn render_serial(raw: &str, is_1904: bool, format: &str) -> String {
    raw.parse::<f64>()
        .ok()
        .and_then(|serial| serial_to_datetime(serial, is_1904))
        .map(|datetime| datetime.format(format).to_string())
        .unwrap_or_else(|| raw.to_owned())
}

/// Converts a spreadsheet date serial to a date-time, rounded to milliseconds.
/// Serials below 60 in the 1900 system are shifted by one day for the Lotus 1-2-3 leap year bug.
pub(crate) fn serial_to_datetime(serial: f64, is_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let mut days = serial.trunc() as i64;
    if is_1904 {
        days += 1_462;
    } else if days < 60 {
        days += 1;
    }
    let milliseconds = (serial.fract() * 86_400_000f64).round() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_days(days)?)?
        .checked_add_signed(TimeDelta::try_milliseconds(milliseconds)?)
}
