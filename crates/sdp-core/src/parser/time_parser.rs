//! Decoders for `t=`, `r=` and `z=` lines
//!
//! Durations in `r=` and `z=` lines may use the RFC 8866 shorthand units
//! `d`, `h`, `m` and `s`. They are normalized to seconds on decode, so the
//! unit is not preserved on output.

use crate::error::{parse_uint, FieldError, NumericReason};
use crate::parser::lexer::{Field, Lexer};
use crate::types::{RepeatTime, TimeZone, Timing};

/// `t=<start-time> <stop-time>`
pub fn parse_timing(lexer: &mut Lexer<'_>) -> Result<Timing, FieldError> {
    let start = lexer.read_uint("start time")?;
    let stop = lexer.read_uint("stop time")?;
    Ok(Timing { start, stop })
}

/// `r=<repeat interval> <active duration> <offset>+`
pub fn parse_repeat_time(lexer: &mut Lexer<'_>) -> Result<RepeatTime, FieldError> {
    let interval = parse_duration("repeat interval", lexer.expect_field("repeat interval")?)?;
    let duration = parse_duration("active duration", lexer.expect_field("active duration")?)?;
    let mut offsets = vec![parse_duration("offset", lexer.expect_field("offset")?)?];
    while let Field::Token(token) = lexer.read_field() {
        offsets.push(parse_duration("offset", token)?);
    }
    Ok(RepeatTime {
        interval,
        duration,
        offsets,
    })
}

/// `z=<adjustment time> <offset> [<adjustment time> <offset>]*`
pub fn parse_time_zones(lexer: &mut Lexer<'_>) -> Result<Vec<TimeZone>, FieldError> {
    let mut zones = Vec::new();
    loop {
        let adjustment_time = match lexer.read_field() {
            Field::Token(token) => parse_uint("adjustment time", token)?,
            Field::EndOfLine | Field::EndOfInput if !zones.is_empty() => break,
            Field::EndOfLine => return Err(FieldError::syntax("missing adjustment time")),
            Field::EndOfInput => return Err(FieldError::Truncated("adjustment time")),
        };
        let offset = lexer.expect_field("time zone offset")?;
        let offset = parse_signed_duration("time zone offset", offset)?;
        zones.push(TimeZone {
            adjustment_time,
            offset,
        });
    }
    Ok(zones)
}

fn unit_multiplier(unit: u8) -> Option<u64> {
    match unit {
        b'd' => Some(86_400),
        b'h' => Some(3_600),
        b'm' => Some(60),
        b's' => Some(1),
        _ => None,
    }
}

/// Decode `<digits>[d|h|m|s]` into seconds
pub fn parse_duration(field: &'static str, value: &str) -> Result<u64, FieldError> {
    let (digits, multiplier) = match value.as_bytes().last().copied().and_then(unit_multiplier) {
        Some(multiplier) => (&value[..value.len() - 1], multiplier),
        None => (value, 1),
    };
    let amount: u64 = parse_uint(field, digits).map_err(|err| with_value(err, value))?;
    amount
        .checked_mul(multiplier)
        .ok_or_else(|| FieldError::Numeric {
            field,
            value: value.to_string(),
            reason: NumericReason::Overflow,
        })
}

/// Decode `[-]<digits>[d|h|m|s]` into signed seconds
pub fn parse_signed_duration(field: &'static str, value: &str) -> Result<i64, FieldError> {
    let (negative, magnitude) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let seconds = parse_duration(field, magnitude).map_err(|err| with_value(err, value))?;
    let overflow = || FieldError::Numeric {
        field,
        value: value.to_string(),
        reason: NumericReason::Overflow,
    };
    let seconds = i64::try_from(seconds).map_err(|_| overflow())?;
    Ok(if negative { -seconds } else { seconds })
}

// Report the whole field text rather than the stripped digits
fn with_value(err: FieldError, value: &str) -> FieldError {
    match err {
        FieldError::Numeric { field, reason, .. } => FieldError::Numeric {
            field,
            value: value.to_string(),
            reason,
        },
        other => other,
    }
}
