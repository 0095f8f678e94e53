//! Decoder for `m=` lines

use crate::error::{parse_uint, FieldError};
use crate::parser::lexer::{Field, Lexer};
use crate::parser::validation::parse_protos;
use crate::types::{MediaName, RangedPort};

/// `m=<media> <port>[/<number of ports>] <proto> <fmt> ...`
pub fn parse_media_name(lexer: &mut Lexer<'_>) -> Result<MediaName, FieldError> {
    let media_type = lexer.expect_field("media type")?.parse()?;
    let port = parse_port(lexer.expect_field("port")?)?;
    let protos = parse_protos(lexer.expect_field("transport protocol")?)?;

    let mut formats = vec![lexer.expect_field("media format")?.to_string()];
    while let Field::Token(format) = lexer.read_field() {
        formats.push(format.to_string());
    }

    Ok(MediaName {
        media_type,
        port,
        protos,
        formats,
    })
}

fn parse_port(text: &str) -> Result<RangedPort, FieldError> {
    match text.split_once('/') {
        Some((value, range)) => Ok(RangedPort {
            value: parse_uint("port", value)?,
            range: Some(parse_uint("port count", range)?),
        }),
        None => Ok(RangedPort {
            value: parse_uint("port", text)?,
            range: None,
        }),
    }
}
