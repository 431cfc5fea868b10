//! Search criteria over entity fields.
//!
//! A [`Criteria`] maps field names to expected [`Value`]s. Entities expose their searchable fields
//! through [`Entity::field`], which returns a [`Field`]. How a field is compared depends on the
//! field's kind:
//!
//! - [`Field::Text`]: case-insensitive substring match against a [`Value::Text`];
//! - [`Field::Key`]: exact match against a [`Value::Text`] (ids referencing other entities);
//! - [`Field::Int`]: exact match against a [`Value::Int`].
//!
//! Any other combination does not match, and neither does a field the entity does not expose.

prelude! {
    regex::{Regex, RegexBuilder},
}

/// A searchable field value, borrowed from an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Text(&'a str),
    Key(&'a str),
    Int(i64),
}

/// An expected value in a [`Criteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(i64),
}
impl From<&'_ str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}
impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Self::Int(n.into())
    }
}

/// Field name to expected value, all of which must hold.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    fields: BTreeMap<String, Value>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, field: impl Into<String>, val: impl Into<Value>) -> Self {
        self.insert(field, val);
        self
    }
    /// Sets the expected value of a field, returns the previous one if any.
    pub fn insert(&mut self, field: impl Into<String>, val: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), val.into())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Prepares the criteria for matching, text patterns are compiled once here.
    pub fn compile(&self) -> Res<Query> {
        let mut tests = Vec::with_capacity(self.fields.len());
        for (field, val) in self.fields.iter() {
            let test = match val {
                Value::Int(n) => Test::Int(*n),
                Value::Text(s) => {
                    let regex = RegexBuilder::new(&regex::escape(s))
                        .case_insensitive(true)
                        .build()
                        .context(|| format!("compiling search pattern for field `{}`", field))?;
                    Test::Text {
                        raw: s.clone(),
                        regex,
                    }
                }
            };
            tests.push((field.clone(), test));
        }
        Ok(Query { tests })
    }
}

impl<K, V> FromIterator<(K, V)> for Criteria
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut slf = Self::new();
        for (k, v) in iter {
            slf.insert(k, v);
        }
        slf
    }
}

#[derive(Debug)]
enum Test {
    Text { raw: String, regex: Regex },
    Int(i64),
}

impl Test {
    fn accepts(&self, field: Field) -> bool {
        match (self, field) {
            (Self::Text { regex, .. }, Field::Text(s)) => regex.is_match(s),
            (Self::Text { raw, .. }, Field::Key(s)) => raw == s,
            (Self::Int(n), Field::Int(m)) => *n == m,
            _ => false,
        }
    }
}

/// Compiled [`Criteria`].
#[derive(Debug)]
pub struct Query {
    tests: Vec<(String, Test)>,
}

impl Query {
    /// True if `entity` satisfies every test.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        self.tests.iter().all(|(name, test)| {
            entity
                .field(name)
                .map(|field| test.accepts(field))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: String,
        name: String,
        credits: i64,
    }
    impl Entity for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn field(&self, name: &str) -> Option<Field<'_>> {
            match name {
                "id" => Some(Field::Key(&self.id)),
                "name" => Some(Field::Text(&self.name)),
                "credits" => Some(Field::Int(self.credits)),
                _ => None,
            }
        }
    }

    fn row() -> Row {
        Row {
            id: "ING001".into(),
            name: "Programación I".into(),
            credits: 6,
        }
    }

    #[test]
    fn text_is_case_insensitive_substring() {
        let q = Criteria::new().with("name", "PROGRAMACIÓN").compile().unwrap();
        assert!(q.matches(&row()));
        let q = Criteria::new().with("name", "ción i").compile().unwrap();
        assert!(q.matches(&row()));
        let q = Criteria::new().with("name", "física").compile().unwrap();
        assert!(!q.matches(&row()));
    }

    #[test]
    fn keys_and_ints_are_exact() {
        let q = Criteria::new().with("id", "ING00").compile().unwrap();
        assert!(!q.matches(&row()));
        let q = Criteria::new().with("id", "ING001").compile().unwrap();
        assert!(q.matches(&row()));
        let q = Criteria::new().with("credits", 6i64).compile().unwrap();
        assert!(q.matches(&row()));
        let q = Criteria::new().with("credits", 8i64).compile().unwrap();
        assert!(!q.matches(&row()));
    }

    #[test]
    fn conjunction_and_unknown_fields() {
        let q: Query = [("name", Value::from("prog")), ("credits", Value::Int(6))]
            .into_iter()
            .collect::<Criteria>()
            .compile()
            .unwrap();
        assert!(q.matches(&row()));
        let q = Criteria::new()
            .with("name", "prog")
            .with("credits", 7i64)
            .compile()
            .unwrap();
        assert!(!q.matches(&row()));
        let q = Criteria::new().with("color", "blue").compile().unwrap();
        assert!(!q.matches(&row()));
        // type mismatch
        let q = Criteria::new().with("credits", "6").compile().unwrap();
        assert!(!q.matches(&row()));
    }

    #[test]
    fn empty_matches_all() {
        let crit = Criteria::new();
        assert!(crit.is_empty());
        assert!(crit.compile().unwrap().matches(&row()));
    }
}
