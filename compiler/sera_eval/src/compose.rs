//! Runtime composition of scanned literal segments.
//!
//! The scanning half of the engine (in `sera_lexer`) turns a literal into
//! an ordered list of decoded text runs and embedded-block handles. This
//! is the runtime half: evaluate each block through the injected
//! capability, display-coerce its value, and concatenate everything in
//! appearance order. Nesting needs no special handling here — by the time
//! an outer literal's block evaluates, any literal inside it has already
//! been scanned and composed through the same path, so composition is
//! innermost-first by construction.

use sera_ir::Segment;

use crate::{EvalError, StrValue, Value};

/// Evaluate and concatenate a literal's segments into its final string.
///
/// Consumes the segments — each is used exactly once. `eval_block` is the
/// embedding language's evaluation capability; for parse-and-evaluate
/// parsers whose block handle *is* the value, it is the identity.
pub fn compose_segments<B>(
    segments: Vec<Segment<B>>,
    mut eval_block: impl FnMut(B) -> Result<Value, EvalError>,
) -> Result<StrValue, EvalError> {
    tracing::debug!(segments = segments.len(), "composing string literal");
    let mut out = StrValue::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Interpolated(block) => {
                let value = eval_block(block)?;
                out.append(&value.display_value());
            }
        }
    }
    Ok(out)
}
