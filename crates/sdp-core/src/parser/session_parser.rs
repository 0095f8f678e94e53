//! Decoders for the fixed session header: `v=`, `o=`, `s=` and the free text lines

use crate::error::FieldError;
use crate::parser::lexer::Lexer;
use crate::types::Origin;

/// `v=0`
pub fn parse_version(lexer: &mut Lexer<'_>) -> Result<u32, FieldError> {
    let version = lexer.read_uint::<u32>("protocol version")?;
    if version != 0 {
        return Err(FieldError::syntax(format!(
            "unsupported protocol version {version}"
        )));
    }
    Ok(version)
}

/// `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
pub fn parse_origin(lexer: &mut Lexer<'_>) -> Result<Origin, FieldError> {
    let username = lexer.expect_field("origin username")?.to_string();
    let session_id = lexer.read_uint::<u64>("session id")?;
    let session_version = lexer.read_uint::<u64>("session version")?;
    let net_type = lexer.expect_field("origin network type")?.parse()?;
    let addr_type = lexer.expect_field("origin address type")?.parse()?;
    let unicast_address = lexer.expect_field("origin address")?.to_string();
    Ok(Origin {
        username,
        session_id,
        session_version,
        net_type,
        addr_type,
        unicast_address,
    })
}

/// `s=<session name>`; must not be empty (a single space is the usual placeholder)
pub fn parse_session_name(lexer: &mut Lexer<'_>) -> Result<String, FieldError> {
    let name = lexer.read_line();
    if name.is_empty() {
        return Err(FieldError::syntax("empty session name"));
    }
    Ok(name.to_string())
}

/// `i=`, `u=`, `e=`, `p=`: raw text up to the end of the line
pub fn parse_text(lexer: &mut Lexer<'_>) -> String {
    lexer.read_line().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumericReason;
    use crate::types::{AddressType, NetworkType};

    fn origin(text: &str) -> Result<Origin, FieldError> {
        parse_origin(&mut Lexer::new(text))
    }

    #[test]
    fn test_version() {
        assert_eq!(parse_version(&mut Lexer::new("0")), Ok(0));
        assert!(matches!(parse_version(&mut Lexer::new("1")), Err(FieldError::Syntax(_))));
        assert!(matches!(
            parse_version(&mut Lexer::new("zero")),
            Err(FieldError::Numeric { .. })
        ));
    }

    #[test]
    fn test_origin() {
        let o = origin("jdoe 2890844526 2890842807 IN IP4 10.47.16.5").unwrap();
        assert_eq!(o.username, "jdoe");
        assert_eq!(o.session_id, 2890844526);
        assert_eq!(o.session_version, 2890842807);
        assert_eq!(o.net_type, NetworkType::In);
        assert_eq!(o.addr_type, AddressType::Ip4);
        assert_eq!(o.unicast_address, "10.47.16.5");

        // 64-bit session ids as produced by browsers
        let o = origin("- 4611731400430051336 2 IN IP6 ::1").unwrap();
        assert_eq!(o.session_id, 4611731400430051336);
    }

    #[test]
    fn test_origin_rejections() {
        match origin("user notanumber 1 IN IP4 1.1.1.1") {
            Err(FieldError::Numeric { field, reason, .. }) => {
                assert_eq!(field, "session id");
                assert_eq!(reason, NumericReason::NotANumber);
            }
            other => panic!("unexpected {other:?}"),
        }
        match origin("user 18446744073709551616 1 IN IP4 1.1.1.1") {
            Err(FieldError::Numeric { reason, .. }) => assert_eq!(reason, NumericReason::Overflow),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(origin("user 1 1 XX IP4 1.1.1.1"), Err(FieldError::Syntax(_))));
        assert!(matches!(origin("user 1 1 IN IP5 1.1.1.1"), Err(FieldError::Syntax(_))));
        assert_eq!(origin("user 1 1 IN IP4"), Err(FieldError::Truncated("origin address")));
        assert!(matches!(
            parse_origin(&mut Lexer::new("user 1 1 IN\r\n")),
            Err(FieldError::Syntax(_))
        ));
    }

    #[test]
    fn test_session_name() {
        assert_eq!(parse_session_name(&mut Lexer::new("SDP Seminar\r\n")).unwrap(), "SDP Seminar");
        assert_eq!(parse_session_name(&mut Lexer::new(" \r\n")).unwrap(), " ");
        assert!(parse_session_name(&mut Lexer::new("\r\n")).is_err());
    }
}
