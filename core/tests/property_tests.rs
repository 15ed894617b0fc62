// Wire contract properties: framing survives transport, failure replies
// always carry a known reason, timestamps cross the wire as epoch ms.

use proptest::prelude::*;
use tab_roulette_core::protocol::*;
use tab_roulette_core::DateTime;

// Strategy for generating raw frame payloads
fn arb_payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

// Strategy for generating every recognized request
fn arb_known_request() -> impl Strategy<Value = Request> {
    prop_oneof![
        Just(Request::CloseRandomTab),
        Just(Request::ReopenLastTab),
        Just(Request::GetLastClosedTabInfo),
        Just(Request::GetTabCount),
    ]
}

// Strategy for generating any failure reply the daemon can produce
fn arb_failure_response() -> impl Strategy<Value = serde_json::Value> {
    let message = "[a-zA-Z0-9 .]{1,80}";
    prop_oneof![
        Just(serde_json::to_value(CloseTabResponse::last_tab()).unwrap()),
        message.prop_map(|m| serde_json::to_value(CloseTabResponse::error(m)).unwrap()),
        Just(serde_json::to_value(ReopenTabResponse::no_tab_to_reopen()).unwrap()),
        Just(serde_json::to_value(ReopenTabResponse::tab_too_old()).unwrap()),
        message.prop_map(|m| serde_json::to_value(ReopenTabResponse::error(m)).unwrap()),
        message.prop_map(|m| serde_json::to_value(TabCountResponse::error(m)).unwrap()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any payload under the size cap survives framing and parses back to
    /// the same length.
    #[test]
    fn prop_frame_length_round_trips(payload in arb_payload()) {
        let framed = frame_message(&payload);

        prop_assert_eq!(framed.len(), 4 + payload.len());
        prop_assert_eq!(parse_frame_length(&framed), Some(payload.len()));
        prop_assert_eq!(&framed[4..], payload.as_slice());
    }

    /// A sequence of frames written to a stream reads back intact, in order,
    /// followed by a clean EOF.
    #[test]
    fn prop_frames_survive_transport(payloads in prop::collection::vec(arb_payload(), 1..5)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (mut client, mut server) = tokio::io::duplex(8192);

            let to_send = payloads.clone();
            let writer = tokio::spawn(async move {
                for payload in &to_send {
                    write_frame(&mut client, payload).await.unwrap();
                }
                // Dropping the writer closes the stream
            });

            for expected in &payloads {
                let received = read_frame(&mut server).await.unwrap();
                prop_assert_eq!(received.as_deref(), Some(expected.as_slice()));
            }

            writer.await.unwrap();
            let eof = read_frame(&mut server).await.unwrap();
            prop_assert_eq!(eof, None);
            Ok(())
        })?;
    }

    /// Every recognized request keeps its action tag across the wire.
    #[test]
    fn prop_request_tags_round_trip(request in arb_known_request()) {
        let value = serde_json::to_value(request).unwrap();

        prop_assert!(value["action"].is_string(), "requests are tagged by action");
        let back: Request = serde_json::from_value(value).unwrap();
        prop_assert_eq!(back, request);
    }

    /// Every failure reply has success=false, a reason from the fixed set,
    /// and never a success payload alongside it.
    #[test]
    fn prop_failure_replies_are_well_formed(value in arb_failure_response()) {
        prop_assert_eq!(&value["success"], &serde_json::Value::Bool(false));

        let reason = value["reason"].as_str().unwrap_or_default();
        prop_assert!(
            matches!(reason, "last_tab" | "no_tab_to_reopen" | "tab_too_old" | "error"),
            "unexpected reason tag: {}",
            reason
        );

        if value.get("error").is_some() {
            prop_assert_eq!(reason, "error", "only collaborator failures carry a message");
        }

        prop_assert!(value.get("closedTab").is_none());
        prop_assert!(value.get("reopenedTab").is_none());
        prop_assert!(value.get("tab").is_none());
    }

    /// Timestamps serialize as integer epoch milliseconds and parse back to
    /// the same instant.
    #[test]
    fn prop_closed_at_crosses_wire_as_epoch_ms(ms in 0i64..4_102_444_800_000i64) {
        let summary = LastClosedTabSummary {
            title: "t".to_string(),
            url: "u".to_string(),
            closed_at: DateTime::from_timestamp_millis(ms).unwrap(),
        };

        let value = serde_json::to_value(&summary).unwrap();
        prop_assert_eq!(value["closedAt"].as_i64(), Some(ms));

        let back: LastClosedTabSummary = serde_json::from_value(value).unwrap();
        prop_assert_eq!(back.closed_at.timestamp_millis(), ms);
    }
}
