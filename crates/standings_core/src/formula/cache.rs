//! Process-wide formula compilation cache.
//!
//! Ranking passes recompile the league's points formula on every
//! invocation; the text rarely changes, so compiled programs are shared
//! behind a lock, keyed by formula text. `compile` itself stays pure and
//! remains available uncached.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::compiler::{compile, CompiledFormula};
use super::error::FormulaSyntaxError;

static COMPILE_CACHE: Lazy<RwLock<HashMap<String, Arc<CompiledFormula>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Compile through the shared cache.
///
/// The cache is keyed by expression text alone; callers are expected to
/// compile against one fixed allowed-variable set (the score variables).
pub fn compile_cached(
    expression: &str,
    allowed: &[&str],
) -> Result<Arc<CompiledFormula>, FormulaSyntaxError> {
    if let Some(hit) = COMPILE_CACHE
        .read()
        .expect("formula cache lock poisoned")
        .get(expression)
    {
        return Ok(Arc::clone(hit));
    }

    let compiled = Arc::new(compile(expression, allowed)?);
    COMPILE_CACHE
        .write()
        .expect("formula cache lock poisoned")
        .insert(expression.to_string(), Arc::clone(&compiled));
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_returns_the_same_compilation() {
        let first = compile_cached("W + 0*L", &["W", "L"]).unwrap();
        let second = compile_cached("W + 0*L", &["W", "L"]).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_does_not_store_failures() {
        assert!(compile_cached("W + missing_cache_var", &["W"]).is_err());
        assert!(compile_cached("W + missing_cache_var", &["W"]).is_err());
    }
}
