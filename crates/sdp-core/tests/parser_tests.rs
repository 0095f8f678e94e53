// Integration tests for SDP decoding, encoding and the accessor surface

use std::thread;

use rvoip_sdp_core::{
    parse, parse_with, serialize, AddressQualifier, Attribute, AttributeLevel, Codec, Direction,
    Error, ErrorKind, MediaType, NumericReason, ParserConfig, RepeatTime, SessionDescription,
};

const RFC_EXAMPLE: &str = "v=0\r\n\
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
s=SDP Seminar\r\n\
i=A Seminar on the session description protocol\r\n\
u=http://www.example.com/seminars/sdp.pdf\r\n\
e=j.doe@example.com (Jane Doe)\r\n\
c=IN IP4 224.2.17.12/127\r\n\
t=2873397496 2873404696\r\n\
a=recvonly\r\n\
m=audio 49170 RTP/AVP 0\r\n\
m=video 51372 RTP/AVP 99\r\n\
a=rtpmap:99 h263-1998/90000\r\n";

const WEBRTC_OFFER: &str = "v=0\r\n\
o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
s=-\r\n\
t=0 0\r\n\
a=group:BUNDLE 0 1 2\r\n\
a=extmap-allow-mixed\r\n\
a=msid-semantic:WMS stream-1\r\n\
m=audio 9 UDP/TLS/RTP/SAVPF 111 0\r\n\
c=IN IP4 0.0.0.0\r\n\
a=rtcp:9 IN IP4 0.0.0.0\r\n\
a=ice-ufrag:4ZcD\r\n\
a=ice-pwd:2/1muCWoOi3uLifh0NuRHlfW\r\n\
a=ice-options:trickle\r\n\
a=fingerprint:sha-256 4A:AD:B9:B1:3F:82:18:3B:54:02:12:DF:3E:5D:49:6B:19:E5:7C:AB:3E:4B:65:BA:BA:D5:1A:DA:3B:A9:63:0D\r\n\
a=setup:actpass\r\n\
a=mid:0\r\n\
a=extmap:1 urn:ietf:params:rtp-hdrext:ssrc-audio-level\r\n\
a=sendrecv\r\n\
a=msid:stream-1 track-1\r\n\
a=rtcp-mux\r\n\
a=rtpmap:111 opus/48000/2\r\n\
a=rtcp-fb:111 transport-cc\r\n\
a=fmtp:111 minptime=10;useinbandfec=1\r\n\
a=rtpmap:0 PCMU/8000\r\n\
a=ssrc:3735928559 cname:user@example.com\r\n\
a=candidate:1 1 udp 2122260223 192.168.1.2 54400 typ host generation 0\r\n\
a=end-of-candidates\r\n\
m=video 9 UDP/TLS/RTP/SAVPF 120 121\r\n\
c=IN IP4 0.0.0.0\r\n\
a=mid:1\r\n\
a=sendonly\r\n\
a=rtcp-mux\r\n\
a=rtcp-rsize\r\n\
a=rtpmap:120 VP8/90000\r\n\
a=rtcp-fb:120 nack pli\r\n\
a=rtpmap:121 rtx/90000\r\n\
a=fmtp:121 apt=120\r\n\
a=ssrc-group:FID 1234 5678\r\n\
a=rid:1 recv pt=96,97;max-width=1280;max-height=720\r\n\
a=simulcast:send 1;~2,3 recv 4\r\n\
m=application 9 UDP/DTLS/SCTP webrtc-datachannel\r\n\
c=IN IP4 0.0.0.0\r\n\
a=mid:2\r\n\
a=sctp-port:5000\r\n\
a=max-message-size:262144\r\n";

fn header() -> String {
    "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n".to_string()
}

fn parse_str(text: &str) -> Result<SessionDescription, Error> {
    parse_with(text.as_bytes(), &ParserConfig::strict())
}

#[test]
fn test_canonical_documents_round_trip_byte_exact() {
    for text in [RFC_EXAMPLE, WEBRTC_OFFER] {
        let sdp = parse_str(text).expect("canonical document should parse");
        assert_eq!(sdp.to_string(), text);
        assert_eq!(serialize(&sdp), text.as_bytes());
        assert_eq!(sdp.encoded_len(), text.len());
    }
}

#[test]
fn test_rfc_example_fields() {
    let sdp = parse_str(RFC_EXAMPLE).unwrap();
    assert_eq!(sdp.origin.username, "jdoe");
    assert_eq!(sdp.session_name, "SDP Seminar");
    assert_eq!(sdp.email.as_deref(), Some("j.doe@example.com (Jane Doe)"));
    let connection = sdp.connection.as_ref().unwrap();
    assert_eq!(connection.address.address, "224.2.17.12");
    assert_eq!(connection.address.qualifier, AddressQualifier::Ttl(127));
    assert_eq!(sdp.direction(), Some(Direction::RecvOnly));
    assert_eq!(sdp.media.len(), 2);
    assert_eq!(sdp.media[1].media_name.formats, vec!["99"]);
}

#[test]
fn test_other_newline_styles_normalize_to_crlf() {
    let lf = RFC_EXAMPLE.replace("\r\n", "\n");
    let cr = RFC_EXAMPLE.replace("\r\n", "\r");
    for text in [lf, cr] {
        let sdp = parse_str(&text).unwrap();
        assert_eq!(sdp.to_string(), RFC_EXAMPLE);
    }

    // missing final terminator
    let sdp = parse_str(RFC_EXAMPLE.trim_end()).unwrap();
    assert_eq!(sdp.to_string(), RFC_EXAMPLE);
}

#[test]
fn test_repeat_time_shorthand_is_normalized() {
    let seconds = format!("{}r=604800 3600 0 90000\r\n", header());
    let shorthand = format!("{}r=7d 1h 0 25h\r\n", header());
    let a = parse_str(&seconds).unwrap();
    let b = parse_str(&shorthand).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        b.time_descriptions[0].repeat_times,
        vec![RepeatTime {
            interval: 604800,
            duration: 3600,
            offsets: vec![0, 90000],
        }]
    );
    assert_eq!(b.to_string(), seconds);
}

#[test]
fn test_codec_lookup() {
    let sdp = parse_str(WEBRTC_OFFER).unwrap();

    let vp8 = sdp.codec_for_payload_type(120).unwrap();
    assert_eq!(vp8.name, "VP8");
    assert_eq!(vp8.clock_rate, 90000);
    assert_eq!(vp8.rtcp_feedback, vec!["nack pli"]);

    assert_eq!(sdp.payload_type_for_codec(&Codec::named("VP8")).unwrap(), 120);
    assert_eq!(sdp.payload_type_for_codec(&Codec::named("vp8")).unwrap(), 120);
    assert_eq!(
        sdp.payload_type_for_codec(&Codec::named("opus").with_clock_rate(48000))
            .unwrap(),
        111
    );
    assert_eq!(
        sdp.payload_type_for_codec(&Codec::named("rtx").with_fmtp("apt=120"))
            .unwrap(),
        121
    );
    assert_eq!(
        sdp.payload_type_for_codec(&Codec::named("opus").with_fmtp(" useinbandfec=1; minptime=10"))
            .unwrap(),
        111
    );

    let opus = sdp.codec_for_payload_type(111).unwrap();
    assert_eq!(opus.encoding_parameters, "2");
    assert_eq!(opus.fmtp, "minptime=10;useinbandfec=1");
    assert_eq!(opus.rtcp_feedback, vec!["transport-cc"]);

    assert_eq!(sdp.codec_for_payload_type(42), Err(Error::PayloadTypeNotFound(42)));
    assert_eq!(
        sdp.payload_type_for_codec(&Codec::named("opus").with_clock_rate(8000)),
        Err(Error::CodecNotFound)
    );
    assert_eq!(
        sdp.payload_type_for_codec(&Codec::named("H264")).unwrap_err().kind(),
        ErrorKind::Lookup
    );

    let audio = sdp.media_by_mid("0").unwrap().codecs();
    let order: Vec<u8> = audio.iter().map(|c| c.payload_type).collect();
    assert_eq!(order, vec![111, 0]);
}

#[test]
fn test_media_accessors() {
    let sdp = parse_str(WEBRTC_OFFER).unwrap();

    let audio = sdp.first_active_media(MediaType::Audio).unwrap();
    assert_eq!(audio.mid(), Some("0"));
    assert_eq!(audio.direction(), Some(Direction::SendRecv));
    assert!(audio.has_attribute("rtcp-mux"));
    assert_eq!(audio.attributes_named("rtpmap").count(), 2);

    let video = sdp.media_by_mid("1").unwrap();
    assert_eq!(video.media_name.media_type, MediaType::Video);
    assert!(sdp.media_by_mid("9").is_none());
    assert!(sdp.has_attribute("extmap-allow-mixed"));
    assert!(matches!(sdp.attribute("group"), Some(Attribute::Group(_))));
}

#[test]
fn test_first_active_media_skips_disabled_sections() {
    let text = format!(
        "{}m=audio 0 RTP/AVP 0\r\n\
         m=audio 49170 RTP/AVP 0\r\n\
         a=inactive\r\n\
         m=audio 49172 RTP/AVP 8\r\n\
         a=mid:live\r\n",
        header()
    );
    let sdp = parse_str(&text).unwrap();
    assert_eq!(sdp.first_active_media(MediaType::Audio).unwrap().mid(), Some("live"));
    assert!(sdp.first_active_media(MediaType::Video).is_none());

    let all_inactive = format!("{}a=inactive\r\nm=audio 49170 RTP/AVP 0\r\n", header());
    let sdp = parse_str(&all_inactive).unwrap();
    assert!(sdp.first_active_media(MediaType::Audio).is_none());
}

#[test]
fn test_group_mid_management() {
    let mut sdp = parse_str(WEBRTC_OFFER).unwrap();
    let before = sdp.attributes.len();

    assert!(!sdp.add_group_mid("BUNDLE", "1"));
    assert!(sdp.add_group_mid("BUNDLE", "3"));
    assert_eq!(
        sdp.group_mids("BUNDLE").unwrap(),
        ["0", "1", "2", "3"].map(String::from)
    );
    assert!(sdp.remove_group_mid("BUNDLE", "0"));
    assert!(!sdp.remove_group_mid("BUNDLE", "0"));
    assert!(sdp.to_string().contains("a=group:BUNDLE 1 2 3\r\n"));

    assert_eq!(sdp.group_mids("LS"), None);
    assert!(sdp.add_group_mid("LS", "0"));
    assert_eq!(sdp.attributes.len(), before + 1);
    assert!(sdp.to_string().contains("a=group:LS 0\r\n"));
}

#[test]
fn test_clone_is_deep() {
    let original = parse_str(WEBRTC_OFFER).unwrap();
    let mut copy = original.clone();
    copy.media[0].attributes.clear();
    copy.add_group_mid("BUNDLE", "extra");
    assert_eq!(original.to_string(), WEBRTC_OFFER);
    assert_ne!(copy, original);
}

#[test]
fn test_rejection_cases() {
    let cases: Vec<(String, ErrorKind, usize)> = vec![
        (format!("{}c=XX IP4 1.2.3.4\r\n", "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\n"), ErrorKind::Syntax, 4),
        (
            "v=0\r\no=user notanumber 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n".to_string(),
            ErrorKind::Numeric,
            2,
        ),
        ("v=1\r\n".to_string(), ErrorKind::Syntax, 1),
        (format!("{}m=image 9 udptl t38\r\n", header()), ErrorKind::Syntax, 5),
        (format!("{}m=audio 9 RTP/XYZ 0\r\n", header()), ErrorKind::Syntax, 5),
        (format!("{}m=audio 70000 RTP/AVP 0\r\n", header()), ErrorKind::Numeric, 5),
        (format!("{}a=x-unknown\r\n", header()), ErrorKind::UnsupportedAttribute, 5),
        (format!("{}a=ice-lite:yes\r\n", header()), ErrorKind::Syntax, 5),
        (format!("{}m=audio 9 RTP/AVP 0\r\na=ptime\r\n", header()), ErrorKind::Syntax, 6),
        (format!("{}m=audio 9 RTP/AVP 0\r\na=rtpmap:200 foo/8000\r\n", header()), ErrorKind::Syntax, 6),
        (format!("{}x=unknown\r\n", header()), ErrorKind::Syntax, 5),
        (format!("{}t=0 0 0\r\n", header()), ErrorKind::Syntax, 5),
        ("v=0\r\no=- 1 1 IN IP4\r\n".to_string(), ErrorKind::Syntax, 2),
        ("v=0\r\no=- 1 1 IN IP4".to_string(), ErrorKind::Truncated, 2),
    ];
    for (text, kind, line) in cases {
        let err = parse_str(&text).expect_err(&text);
        assert_eq!(err.kind(), kind, "{text:?}: {err}");
        assert_eq!(err.line(), Some(line), "{text:?}: {err}");
    }
}

#[test]
fn test_numeric_error_details() {
    let err = parse_str("v=0\r\no=user notanumber 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n").unwrap_err();
    match err {
        Error::Numeric {
            line,
            field,
            value,
            reason,
        } => {
            assert_eq!(line, 2);
            assert_eq!(field, "session id");
            assert_eq!(value, "notanumber");
            assert_eq!(reason, NumericReason::NotANumber);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_grammar_ordering() {
    let out_of_order = [
        // t= before s=
        "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\nt=0 0\r\ns=-\r\n",
        // o= first
        "o=- 1 1 IN IP4 127.0.0.1\r\nv=0\r\ns=-\r\nt=0 0\r\n",
        // i= after c=
        "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nc=IN IP4 1.1.1.1\r\ni=x\r\nt=0 0\r\n",
        // two session c= lines
        "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nc=IN IP4 1.1.1.1\r\nc=IN IP4 1.1.1.2\r\nt=0 0\r\n",
        // r= after z=
        "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nz=0 0\r\nr=1 1 0\r\n",
        // c= after a media attribute
        "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nm=audio 9 RTP/AVP 0\r\na=rtcp-mux\r\nc=IN IP4 1.1.1.1\r\n",
        // t= inside a media section
        "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nm=audio 9 RTP/AVP 0\r\nt=0 0\r\n",
    ];
    for text in out_of_order {
        let err = parse_str(text).unwrap_err();
        assert!(matches!(err, Error::UnexpectedLine { .. }), "{text:?}: {err:?}");
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    let err = parse_str(out_of_order[0]).unwrap_err();
    assert_eq!(
        err,
        Error::UnexpectedLine {
            line: 3,
            key: 't',
            state: "origin"
        }
    );
}

#[test]
fn test_truncated_documents() {
    for (text, expected) in [
        ("", "version line"),
        ("v=0\r\n", "origin line"),
        ("v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\n", "session name line"),
        ("v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nc=IN IP4 1.1.1.1\r\n", "timing line"),
    ] {
        match parse_str(text) {
            Err(Error::Truncated { expected: got, .. }) => assert_eq!(got, expected, "{text:?}"),
            other => panic!("{text:?}: unexpected {other:?}"),
        }
    }
}

#[test]
fn test_attribute_scoping() {
    // session-only attribute inside a media section
    let err = parse_str(&format!("{}m=audio 9 RTP/AVP 0\r\na=ice-lite\r\n", header())).unwrap_err();
    assert_eq!(
        err,
        Error::AttributeScope {
            line: 6,
            name: "ice-lite".to_string(),
            level: AttributeLevel::Media,
        }
    );

    // media-only attribute at session level
    let err = parse_str(&format!("{}a=rtpmap:96 opus/48000/2\r\n", header())).unwrap_err();
    assert!(matches!(
        err,
        Error::AttributeScope {
            line: 5,
            level: AttributeLevel::Session,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::UnsupportedAttribute);

    // attributes legal at both levels
    let text = format!(
        "{}a=setup:actpass\r\na=sendrecv\r\nm=audio 9 RTP/AVP 0\r\na=setup:active\r\na=sendonly\r\n",
        header()
    );
    assert!(parse_str(&text).is_ok());

    // scoping is enforced under the permissive policy too
    let err = parse_with(
        format!("{}a=mid:0\r\n", header()).as_bytes(),
        &ParserConfig::permissive(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::AttributeScope { .. }));
}

#[test]
fn test_programmatic_attribute_scoping() {
    let mut sdp = parse_str(&header()).unwrap();
    let err = sdp.add_attribute(Attribute::Mid("0".to_string())).unwrap_err();
    assert!(matches!(err, Error::AttributeScope { line: 0, .. }));
    assert_eq!(err.line(), None);
    assert!(sdp.attributes.is_empty());
}

#[test]
fn test_permissive_policy_keeps_unknown_attributes() {
    let text = format!(
        "{}a=x-google-flag:conference\r\nm=audio 9 RTP/AVP 0\r\na=x-flag\r\n",
        header()
    );
    assert!(parse_str(&text).is_err());

    let sdp = parse_with(text.as_bytes(), &ParserConfig::permissive()).unwrap();
    assert_eq!(
        sdp.attribute("x-google-flag"),
        Some(&Attribute::Unknown {
            name: "x-google-flag".to_string(),
            value: Some("conference".to_string()),
        })
    );
    assert!(sdp.media[0].has_attribute("x-flag"));
    assert_eq!(sdp.to_string(), text);
}

#[test]
fn test_invalid_utf8() {
    let mut input = header().into_bytes();
    input.extend_from_slice(b"a=tool:\xc3\x28\r\n");
    assert_eq!(parse(&input), Err(Error::InvalidUtf8 { line: 5 }));
}

#[test]
fn test_concurrent_parsing() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let text = if i % 2 == 0 { RFC_EXAMPLE } else { WEBRTC_OFFER };
                for _ in 0..50 {
                    let sdp = parse_str(text).unwrap();
                    assert_eq!(sdp.to_string(), text);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_json_serialization_of_model() {
    let sdp = parse_str(WEBRTC_OFFER).unwrap();
    let json = serde_json::to_string(&sdp).unwrap();
    let back: SessionDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sdp);
}
