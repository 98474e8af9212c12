/// HTTP verbs the router can dispatch on.
///
/// The set is fixed: per-node handler tables are arrays indexed by the
/// discriminant, so adding a verb means growing every table. `PROPFIND` is
/// carried alongside the standard verbs for WebDAV-style embedders.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Connect = 0,
    Delete = 1,
    Get = 2,
    Head = 3,
    Options = 4,
    Patch = 5,
    Post = 6,
    Propfind = 7,
    Put = 8,
    Trace = 9,
}

impl Method {
    /// Number of handler slots in a method table.
    pub const COUNT: usize = 10;

    /// Every verb the router knows, in table order.
    pub const ALL: [Method; Method::COUNT] = [
        Method::Connect,
        Method::Delete,
        Method::Get,
        Method::Head,
        Method::Options,
        Method::Patch,
        Method::Post,
        Method::Propfind,
        Method::Put,
        Method::Trace,
    ];

    /// Resolve an uppercase verb name. Unknown verbs yield `None`; callers
    /// on the registration and resolution paths drop them silently rather
    /// than erroring.
    #[inline(always)]
    pub fn from_name(name: &str) -> Option<Method> {
        match name {
            "CONNECT" => Some(Method::Connect),
            "DELETE" => Some(Method::Delete),
            "GET" => Some(Method::Get),
            "HEAD" => Some(Method::Head),
            "OPTIONS" => Some(Method::Options),
            "PATCH" => Some(Method::Patch),
            "POST" => Some(Method::Post),
            "PROPFIND" => Some(Method::Propfind),
            "PUT" => Some(Method::Put),
            "TRACE" => Some(Method::Trace),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Connect => "CONNECT",
            Method::Delete => "DELETE",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Propfind => "PROPFIND",
            Method::Put => "PUT",
            Method::Trace => "TRACE",
        }
    }
}
