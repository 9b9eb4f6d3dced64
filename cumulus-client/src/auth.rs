use cumulus_login::Authentication;

/// How the client is logged in to the remote.
pub enum AuthenticationKind {
    /// With a renewable authentication obtained from the SSO.
    OAuth(Authentication),

    /// With a static bearer token.
    Token(Token),
}

impl AuthenticationKind {
    /// Add the `Authorization` header to a request.
    pub fn set_auth_headers(&self, request: http::request::Builder) -> http::request::Builder {
        match self {
            AuthenticationKind::OAuth(auth) => auth.set_auth_headers(request),
            AuthenticationKind::Token(token) => token.set_auth_headers(request),
        }
    }
}

impl From<Authentication> for AuthenticationKind {
    fn from(auth: Authentication) -> Self {
        Self::OAuth(auth)
    }
}

impl From<Token> for AuthenticationKind {
    fn from(auth: Token) -> Self {
        Self::Token(auth)
    }
}

/// Data used to authenticate with a fixed bearer token, for example a token
/// obtained out of band or one managed by the caller.
pub struct Token {
    /// The token's value.
    pub value: String,
}

impl Token {
    pub fn set_auth_headers(&self, request: http::request::Builder) -> http::request::Builder {
        request.header(
            http::header::AUTHORIZATION,
            format!("Bearer {}", self.value),
        )
    }
}
