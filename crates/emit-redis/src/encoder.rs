//! Encoding of event payloads into Redis stream arguments.
//!
//! Redis stores every stream field as a byte string, so integers are sent in
//! decimal form and text is sent as-is.

use crate::config::StreamTrim;
use stream_event_generator::EventPayload;

/// Auto-generated entry id argument for XADD.
const AUTO_ID: &str = "*";

/// Flatten a payload into `field value field value ...` order.
pub fn encode_fields(payload: &EventPayload) -> Vec<String> {
    payload
        .fields()
        .into_iter()
        .flat_map(|(name, value)| [name.to_string(), value.to_string()])
        .collect()
}

/// Arguments following the `XADD` keyword:
/// `<stream> [MAXLEN [~] <n>] * <field> <value> ...`
pub fn xadd_args(stream: &str, payload: &EventPayload, trim: Option<StreamTrim>) -> Vec<String> {
    let mut args = vec![stream.to_string()];

    if let Some(trim) = trim {
        args.push("MAXLEN".to_string());
        if trim.approximate {
            args.push("~".to_string());
        }
        args.push(trim.max_len.to_string());
    }

    args.push(AUTO_ID.to_string());
    args.extend(encode_fields(payload));
    args
}
