prelude! {
    repr::{Field, Publication},
}

/// Something a [`Repo`] can store.
pub trait Entity {
    /// Unique key within a repository.
    fn id(&self) -> &str;
    /// Searchable field by name, `None` if the entity has no such field.
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

pub trait CanStudy {
    fn study(&self, subject: &str) -> String;
    /// True iff currently enrolled in `course`.
    fn take_exam(&self, course: &str) -> bool;
    fn current_courses(&self) -> Vec<id::Course>;
}

pub trait CanTeach {
    /// Describes the class, or the refusal if not authorized for `course`.
    fn teach(&mut self, course: &str, topic: &str) -> String;
    fn evaluate_students(&self, students: &[id::Student]) -> BTreeMap<id::Student, String>;
    /// Empty if not authorized for `course`.
    fn prepare_material(&self, course: &str) -> Vec<String>;
}

pub trait CanResearch {
    fn research(&self, topic: &str) -> String;
    fn publish(&mut self, title: &str, content: &str) -> bool;
    fn publications(&self) -> Vec<Publication>;
    fn supervise_thesis(&mut self, student: &str, topic: &str) -> String;
}
