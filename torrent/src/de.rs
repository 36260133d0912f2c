use bencode::{Dict, Value};

// Typed field extraction from decoded dictionaries.
// Every getter returns Ok(None) when the key is absent and a FieldError when it is present
// but has the wrong shape.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field:  &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }

    fn wrong_type(field: &'static str, expected: &str, found: &Value) -> Self {
        Self::new(field, format!("expected {}, found {}", expected, found.type_name()))
    }
}

pub fn bytes<'a>(dict: &'a Dict, field: &'static str) -> Result<Option<&'a [u8]>, FieldError> {
    match dict.get(field) {
        None => Ok(None),
        Some(Value::ByteString(b)) => Ok(Some(b)),
        Some(v) => Err(FieldError::wrong_type(field, "byte string", v)),
    }
}

// Byte string that must be valid UTF-8.
pub fn utf8<'a>(dict: &'a Dict, field: &'static str) -> Result<Option<&'a str>, FieldError> {
    bytes(dict, field)?
        .map(|b| std::str::from_utf8(b).map_err(|_| FieldError::new(field, "not valid UTF-8")))
        .transpose()
}

// Byte string decoded leniently, for display-only text.
pub fn text(dict: &Dict, field: &'static str) -> Result<Option<String>, FieldError> {
    Ok(bytes(dict, field)?.map(|b| String::from_utf8_lossy(b).into_owned()))
}

pub fn int(dict: &Dict, field: &'static str) -> Result<Option<i64>, FieldError> {
    match dict.get(field) {
        None => Ok(None),
        Some(Value::Integer(i)) => Ok(Some(*i)),
        Some(v) => Err(FieldError::wrong_type(field, "integer", v)),
    }
}

pub fn uint(dict: &Dict, field: &'static str) -> Result<Option<u64>, FieldError> {
    int(dict, field)?
        .map(|i| u64::try_from(i).map_err(|_| FieldError::new(field, format!("must not be negative, got {}", i))))
        .transpose()
}

pub fn list<'a>(dict: &'a Dict, field: &'static str) -> Result<Option<&'a [Value]>, FieldError> {
    match dict.get(field) {
        None => Ok(None),
        Some(Value::List(l)) => Ok(Some(l)),
        Some(v) => Err(FieldError::wrong_type(field, "list", v)),
    }
}

pub fn dict<'a>(dict: &'a Dict, field: &'static str) -> Result<Option<&'a Dict>, FieldError> {
    match dict.get(field) {
        None => Ok(None),
        Some(Value::Dictionary(d)) => Ok(Some(d)),
        Some(v) => Err(FieldError::wrong_type(field, "dictionary", v)),
    }
}

// announce-list: a list of tiers, each a list of URL strings.
pub fn announce_list(dict: &Dict, field: &'static str) -> Result<Option<Vec<Vec<String>>>, FieldError> {
    let Some(raw) = list(dict, field)? else {
        return Ok(None);
    };

    let mut tiers = Vec::with_capacity(raw.len());
    for tier in raw {
        let urls = tier
            .as_list()
            .ok_or_else(|| FieldError::wrong_type(field, "list of tiers", tier))?;
        let mut out = Vec::with_capacity(urls.len());
        for url in urls {
            let url = url
                .as_str()
                .ok_or_else(|| FieldError::new(field, "tier entries must be UTF-8 strings"))?;
            out.push(url.to_string());
        }
        tiers.push(out);
    }

    let total = tiers.iter().map(|t| t.len()).sum::<usize>();
    if total == 0 { Ok(None) } else { Ok(Some(tiers)) }
}
