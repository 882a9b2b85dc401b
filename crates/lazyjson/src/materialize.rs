//! Forcing a whole value tree.
//!
//! Lazy values only report problems in the parts that are read. The
//! functions here read everything: every container is scanned to its end and
//! every scalar decoded, so a successful call proves the document valid and
//! leaves every cache warm.

use std::{collections::VecDeque, thread};

use log::debug;

use crate::{
    error::{Error, Result},
    options::MaterializeOptions,
    value::Value,
};

impl Value {
    /// Scans and decodes the complete tree below this value.
    ///
    /// ```rust
    /// use lazyjson::parse;
    ///
    /// let ok = parse(r#"{"a": [1, {"b": "c"}]}"#).unwrap();
    /// assert!(ok.materialize().is_ok());
    ///
    /// // Untouched parts are only checked when forced.
    /// let bad = parse(r#"{"a": [1, {"b" "c"}]}"#).unwrap();
    /// assert!(bad.get("a").is_ok());
    /// assert!(bad.materialize().is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// The first syntax, number or string error found, or
    /// [`Error::DepthLimitExceeded`] when containers nest deeper than
    /// [`ParseOptions::max_depth`](crate::ParseOptions::max_depth).
    pub fn materialize(&self) -> Result<()> {
        force(self, 1, depth_limit(self))
    }

    /// Like [`Value::materialize`], but large containers force their
    /// children on scoped worker threads.
    ///
    /// Every nested container whose body is at least
    /// [`parallel_threshold`](MaterializeOptions::parallel_threshold) bytes
    /// long is forced on its own thread, with at most
    /// [`capacity`](MaterializeOptions::capacity) siblings running at once.
    /// Scalars and small containers are forced on the thread that found
    /// them.
    ///
    /// # Errors
    ///
    /// As [`Value::materialize`]. When several threads fail, the error of the
    /// earliest child in document order among those joined first is
    /// returned.
    pub fn materialize_parallel(&self, options: MaterializeOptions) -> Result<()> {
        force_parallel(self, 1, depth_limit(self), &options)
    }
}

fn depth_limit(value: &Value) -> usize {
    value
        .raw()
        .map_or_else(|| crate::ParseOptions::default().max_depth, |raw| raw.options().max_depth)
}

fn force_scalar(value: &Value) -> Result<()> {
    match value {
        Value::Integer(i) => i.value().map(drop),
        Value::Float(f) => f.value().map(drop),
        Value::String(s) => s.as_str().map(drop),
        Value::Null | Value::Boolean(_) | Value::Array(_) | Value::Object(_) => Ok(()),
    }
}

/// Children of a container, scanning it to the end. Objects include the
/// values of repeated keys.
fn children(value: &Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(a) => a.iter().collect(),
        Value::Object(o) => o.all_values(),
        _ => Ok(Vec::new()),
    }
}

fn enter(depth: usize, limit: usize) -> Result<()> {
    if depth > limit {
        return Err(Error::DepthLimitExceeded(limit));
    }
    Ok(())
}

fn force(value: &Value, depth: usize, limit: usize) -> Result<()> {
    if !matches!(value, Value::Array(_) | Value::Object(_)) {
        return force_scalar(value);
    }
    enter(depth, limit)?;
    for child in children(value)? {
        force(&child, depth + 1, limit)?;
    }
    Ok(())
}

/// Containers worth a thread of their own.
fn is_large(value: &Value, options: &MaterializeOptions) -> bool {
    let body_len = match value {
        Value::Array(a) => a.raw().len(),
        Value::Object(o) => o.raw().len(),
        _ => return false,
    };
    options.capacity > 0 && body_len >= options.parallel_threshold
}

fn force_parallel(
    value: &Value,
    depth: usize,
    limit: usize,
    options: &MaterializeOptions,
) -> Result<()> {
    if !is_large(value, options) {
        return force(value, depth, limit);
    }
    enter(depth, limit)?;

    let children = children(value)?;
    debug!(
        "forcing {} children of the {} at offset {} with up to {} threads",
        children.len(),
        value.kind(),
        value.raw().map_or(0, crate::Slice::offset),
        options.capacity
    );

    thread::scope(|scope| {
        let mut in_flight = VecDeque::with_capacity(options.capacity);
        for child in &children {
            if !is_large(child, options) {
                force(child, depth + 1, limit)?;
                continue;
            }
            if in_flight.len() == options.capacity {
                if let Some(oldest) = in_flight.pop_front() {
                    join(oldest)?;
                }
            }
            in_flight.push_back(
                scope.spawn(move || force_parallel(child, depth + 1, limit, options)),
            );
        }
        in_flight.into_iter().try_for_each(join)
    })
}

fn join(handle: thread::ScopedJoinHandle<'_, Result<()>>) -> Result<()> {
    match handle.join() {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
