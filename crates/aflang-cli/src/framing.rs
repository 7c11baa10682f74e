//! NUL-delimited request framing protocol.
//!
//! Wire format per request: `filter_text \0` followed by zero or more
//! `key \0 value \0` pairs, terminated by an empty key or end of stream.
//! Response is one line: `MATCH\n`, `NOMATCH\n`, or `EXCEPTION: <msg>\n`.

use std::io::{BufRead, Write};

use aflang_eval::{EvalError, Evaluator, Value};

use crate::error::{CliError, Result};

pub const MAX_FILTER_BYTES: usize = 10 * 1024;
pub const MAX_VAR_NAME_BYTES: usize = 255;
pub const MAX_VAR_VALUE_BYTES: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub filter_text: String,
    pub vars: Vec<(String, String)>,
}

/// Reads one request, or `None` if the stream ended cleanly before any
/// bytes of a new request were read.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Option<Request>> {
    let Some(filter_bytes) = read_field(reader, MAX_FILTER_BYTES)? else {
        return Ok(None);
    };
    let filter_text = String::from_utf8(filter_bytes)
        .map_err(|_| CliError::Framing("filter text is not valid UTF-8".to_string()))?;

    let mut vars = Vec::new();
    loop {
        let Some(key_bytes) = read_field(reader, MAX_VAR_NAME_BYTES)? else {
            break;
        };
        if key_bytes.is_empty() {
            break;
        }
        let key = String::from_utf8(key_bytes)
            .map_err(|_| CliError::Framing("variable name is not valid UTF-8".to_string()))?;
        let value_bytes = read_field(reader, MAX_VAR_VALUE_BYTES)?
            .ok_or_else(|| CliError::Framing("unexpected end of stream reading variable value".to_string()))?;
        let value = String::from_utf8(value_bytes)
            .map_err(|_| CliError::Framing("variable value is not valid UTF-8".to_string()))?;
        vars.push((key, value));
    }

    Ok(Some(Request { filter_text, vars }))
}

/// Reads bytes up to and including the next NUL, stripping the terminator.
/// Returns `None` only when the stream ends before any byte is read at all
/// (a clean terminator position); an EOF mid-field is a framing error.
fn read_field<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    let n = reader.read_until(0, &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&0) {
        buf.pop();
    } else {
        return Err(CliError::Framing("unterminated field at end of stream".to_string()));
    }
    if buf.len() > max_len {
        return Err(CliError::Framing(format!("field exceeds maximum length of {max_len} bytes")));
    }
    Ok(Some(buf))
}

/// Applies a request's variables and evaluates its filter, producing the
/// wire-format response line.
pub fn evaluate_request(evaluator: &mut Evaluator, request: &Request) -> String {
    evaluator.clear_variables();
    for (name, value) in &request.vars {
        evaluator.add_variable(name.clone(), Value::from_lexeme(value));
    }
    match evaluator.evaluate_as_bool(&request.filter_text) {
        Ok(true) => "MATCH\n".to_string(),
        Ok(false) => "NOMATCH\n".to_string(),
        Err(e) => format!("EXCEPTION: {}\n", format_eval_error(&e)),
    }
}

fn format_eval_error(e: &EvalError) -> String {
    e.to_string().replace('\n', " ")
}

/// Drives the request/response loop over an already-open reader/writer
/// pair until the stream ends cleanly.
pub fn run_loop<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    evaluator: &mut Evaluator,
) -> Result<()> {
    loop {
        match read_request(reader)? {
            None => return Ok(()),
            Some(request) => {
                let response = evaluate_request(evaluator, &request);
                writer.write_all(response.as_bytes())?;
                writer.flush()?;
            }
        }
    }
}
