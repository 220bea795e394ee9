// String-encoded binary data. The core never decodes these.
pub type Base58EncodedAddress = String;
pub type Base64EncodedAddress = String;
pub type Base64EncodedPayload = String;
pub type Base64EncodedSignedPayload = String;
