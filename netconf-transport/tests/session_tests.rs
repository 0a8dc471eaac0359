//! Session integration tests against an in-memory server stream

use std::io::{Cursor, Read, Write};

use netconf_transport::{Framing, Session, SessionConfig, Transport, TransportError};
use rstest::rstest;
use xmltree::Element;

/// A stream that replays canned server output and records client writes
struct ScriptedStream {
    replies: Cursor<Vec<u8>>,
    written: Vec<u8>,
}

impl ScriptedStream {
    fn new(replies: &[u8]) -> Self {
        Self {
            replies: Cursor::new(replies.to_vec()),
            written: Vec::new(),
        }
    }

    fn written(&self) -> String {
        String::from_utf8(self.written.clone()).unwrap()
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.replies.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn operation() -> Element {
    Element::parse(
        r#"<delete-subscription xmlns="urn:ietf:params:xml:ns:yang:ietf-subscribed-notifications"><subscription-id>42</subscription-id></delete-subscription>"#
            .as_bytes(),
    )
    .unwrap()
}

#[test]
fn test_submit_request_end_of_message() {
    let stream = ScriptedStream::new(
        br#"<rpc-reply xmlns="urn:ietf:params:xml:ns:netconf:base:1.0" message-id="101"><ok/></rpc-reply>]]>]]>"#,
    );
    let session = Session::new(stream);

    let reply = session.submit_request(&operation()).expect("exchange should succeed");
    assert_eq!(reply.message_id, "101");
    assert!(reply.document.get_child("ok").is_some());

    let written = session.into_inner().written();
    assert!(written.starts_with("<rpc"));
    assert!(written.contains(r#"message-id="101""#));
    assert!(written.contains("<subscription-id>42</subscription-id>"));
    assert!(written.ends_with("]]>]]>"));
}

#[test]
fn test_message_ids_increment() {
    let stream = ScriptedStream::new(
        br#"<rpc-reply message-id="101"><ok/></rpc-reply>]]>]]><rpc-reply message-id="102"><ok/></rpc-reply>]]>]]>"#,
    );
    let session = Session::new(stream);

    assert_eq!(session.submit_request(&operation()).unwrap().message_id, "101");
    assert_eq!(session.submit_request(&operation()).unwrap().message_id, "102");
}

#[test]
fn test_submit_request_chunked() {
    let reply = br#"<rpc-reply message-id="5"><ok/></rpc-reply>"#;
    let mut server_output = format!("\n#{}\n", reply.len()).into_bytes();
    server_output.extend_from_slice(reply);
    server_output.extend_from_slice(b"\n##\n");

    let config = SessionConfig::base_1_1().with_initial_message_id(5);
    let session = Session::with_config(ScriptedStream::new(&server_output), config).unwrap();

    let reply = session.submit_request(&operation()).unwrap();
    assert_eq!(reply.message_id, "5");

    let written = session.into_inner().written();
    assert!(written.starts_with("\n#"));
    assert!(written.ends_with("\n##\n"));
}

#[test]
fn test_mismatched_reply_is_an_error() {
    let stream = ScriptedStream::new(br#"<rpc-reply message-id="999"><ok/></rpc-reply>]]>]]>"#);
    let session = Session::new(stream);

    let result = session.submit_request(&operation());
    assert!(matches!(
        result,
        Err(TransportError::MessageIdMismatch { ref expected, .. }) if expected == "101"
    ));
}

#[rstest]
#[case(Framing::EndOfMessage)]
#[case(Framing::Chunked)]
fn test_closed_stream(#[case] framing: Framing) {
    let config = SessionConfig::new().with_framing(framing);
    let session = Session::with_config(ScriptedStream::new(b""), config).unwrap();

    let result = session.submit_request(&operation());
    assert!(matches!(result, Err(TransportError::SessionClosed)));
}

#[test]
fn test_unparsable_reply() {
    let session = Session::new(ScriptedStream::new(b"<rpc-reply message-id=\"101\">]]>]]>"));
    assert!(matches!(
        session.submit_request(&operation()),
        Err(TransportError::Parse(_))
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let config = SessionConfig::new().with_max_message_size(0);
    let result = Session::with_config(ScriptedStream::new(b""), config);
    assert!(matches!(result, Err(TransportError::Configuration(_))));
}
