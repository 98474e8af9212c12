/// Registration-time failure codes.
///
/// Matching never produces an error code: resolution outcomes are handler
/// classifications (matched / method-not-allowed / not-found).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RouterErrorCode {
    RoutePathEmpty = 10001,
    RouterSealedCannotInsert = 10002,
}

impl RouterErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RouterErrorCode::RoutePathEmpty => "RoutePathEmpty",
            RouterErrorCode::RouterSealedCannotInsert => "RouterSealedCannotInsert",
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }
}

impl From<RouterErrorCode> for u16 {
    fn from(code: RouterErrorCode) -> u16 {
        code as u16
    }
}
