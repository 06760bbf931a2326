//! Lexical scopes.
//!
//! An [`Environment`] maps names to values and remembers which of them were
//! declared `const`.  Scopes are chained through `enclosing`: lookups and
//! assignments walk outwards until the first scope that owns the name.
//! Children hold a strong reference to their parent, so a parent always
//! outlives the scopes created under it.

use crate::error::{Result, ScriptError};
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Shared handle to a scope.
pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    constants: HashSet<String>,
    enclosing: Option<EnvRef>,
    global: bool,
}

impl Environment {
    /// An empty root scope with no bindings at all.
    pub fn new() -> Self {
        Environment {
            global: true,
            ..Default::default()
        }
    }

    /// The standard root scope: `true`, `false` and `null` as constants.
    pub fn global() -> EnvRef {
        Self::with_globals(std::iter::empty())
    }

    /// Root scope seeded with the literal constants plus `extra` mutable
    /// bindings supplied by the caller.
    pub fn with_globals<I>(extra: I) -> EnvRef
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut env = Environment::new();

        env.seed("true", Value::Boolean(true));
        env.seed("false", Value::Boolean(false));
        env.seed("null", Value::Null);

        // Seeded constants win over extras of the same name.
        for (name, value) in extra {
            debug!("Seeding global '{}' = {}", name, value);
            env.values.entry(name).or_insert(value);
        }

        Rc::new(RefCell::new(env))
    }

    fn seed(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
        self.constants.insert(name.to_string());
    }

    /// A child scope of `enclosing`.
    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            enclosing: Some(enclosing),
            ..Default::default()
        }
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Does *this* scope (not its parents) bind `name`?
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Was `name` declared `const` in *this* scope?
    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn enclosing(&self) -> Option<&EnvRef> {
        self.enclosing.as_ref()
    }

    /// Bind `name` in this scope.  Shadowing an outer binding is allowed,
    /// redeclaring one of this scope's own names is not.
    pub fn declare(&mut self, name: &str, value: Value, constant: bool) -> Result<Value> {
        if self.values.contains_key(name) {
            return Err(ScriptError::name(format!(
                "Cannot declare '{}': already defined in this scope",
                name
            )));
        }

        debug!("Declaring '{}' = {} (constant={})", name, value, constant);

        if constant {
            self.constants.insert(name.to_string());
        }

        self.values.insert(name.to_string(), value.clone());

        Ok(value)
    }

    /// The nearest scope, starting at `env`, that binds `name`.
    pub fn resolve(env: &EnvRef, name: &str) -> Result<EnvRef> {
        let mut current: EnvRef = Rc::clone(env);

        loop {
            let parent: Option<EnvRef> = {
                let scope = current.borrow();

                if scope.values.contains_key(name) {
                    None
                } else {
                    match &scope.enclosing {
                        Some(parent) => Some(Rc::clone(parent)),
                        None => return Err(undefined(name)),
                    }
                }
            };

            match parent {
                Some(parent) => current = parent,
                None => return Ok(current),
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().lookup(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite the nearest binding of `name`, returning the new value.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value> {
        if self.values.contains_key(name) {
            if self.constants.contains(name) {
                return Err(ScriptError::const_assignment(format!(
                    "Cannot assign to constant '{}'",
                    name
                )));
            }

            debug!("Assigning '{}' = {}", name, value);

            self.values.insert(name.to_string(), value.clone());

            Ok(value)
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }
}

fn undefined(name: &str) -> ScriptError {
    ScriptError::name(format!("Undefined variable '{}'", name))
}
