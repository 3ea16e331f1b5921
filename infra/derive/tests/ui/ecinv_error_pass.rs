use ecinv_derive::ecinv_error;
use std::borrow::Cow;

#[ecinv_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("API error{}: {message}", format_context(.context))]
    Api { message: Cow<'static, str>, code: i64, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, DemoError> {
    raw.parse::<i64>().context("Parsing transport code")
}

fn main() {
    let err = parse("x").unwrap_err();
    assert_eq!(err.code(), "PARSE_ERROR");
    assert!(err.to_string().contains("(Parsing transport code)"));

    let api = DemoError::Api { message: "denied (Code: 0)".into(), code: 0, context: None };
    assert_eq!(api.code(), "API_ERROR");

    let internal: DemoError = "boom".into();
    assert_eq!(internal.code(), "INTERNAL_ERROR");
}
