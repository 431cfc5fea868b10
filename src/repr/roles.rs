//! Capability bundles and the views implementing the capability traits.
//!
//! A [`Student`] carries one optional bundle per capability. The views ([`Studier`], [`Teacher`],
//! [`Researcher`]) borrow the bundle along with whatever else they need to phrase their answers,
//! and dispatch on the person's [`Variant`].

prelude! {
    repr::Identity,
}

/// Hours credited to a teaching assistant per class taught.
pub const TA_HOURS_PER_CLASS: u32 = 2;

/// Study bundle: career and current term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Study {
    pub career: String,
    pub term: u8,
}
impl Study {
    pub fn new(career: impl Into<String>) -> Self {
        Self {
            career: career.into(),
            term: 1,
        }
    }
}

/// Teach bundle: courses the person may teach, and accumulated teaching hours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Teach {
    pub courses: Vec<id::Course>,
    pub hours: u32,
}
impl Teach {
    pub fn new<S: AsRef<str>>(courses: &[S]) -> Self {
        let mut slf = Self::default();
        for course in courses {
            slf.add_course(course.as_ref());
        }
        slf
    }
    pub fn add_course(&mut self, course: &str) -> bool {
        if self.is_assigned(course) {
            return false;
        }
        self.courses.push(course.into());
        true
    }
    pub fn is_assigned(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }
}

/// Research bundle: publications and directed theses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Research {
    pub publications: Vec<Publication>,
    pub directed: Vec<id::Student>,
}

/// Thesis of a graduate or doctoral student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thesis {
    pub topic: String,
    /// Empty until assigned.
    pub advisor: String,
}

/// Staff credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub title: String,
    pub specialty: String,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: DateTime<Utc>,
    /// Only set for staff authors.
    pub specialty: Option<String>,
}

/// [`CanStudy`] view, see [`Student::as_studier`].
pub struct Studier<'a> {
    pub(super) who: &'a Identity,
    pub(super) courses: &'a [id::Course],
    pub(super) study: &'a Study,
}

impl<'a> CanStudy for Studier<'a> {
    fn study(&self, subject: &str) -> String {
        format!(
            "{} is studying {} for their {} degree",
            self.who.name, subject, self.study.career
        )
    }
    fn take_exam(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }
    fn current_courses(&self) -> Vec<id::Course> {
        self.courses.to_vec()
    }
}

/// [`CanTeach`] view, see [`Student::as_teacher`].
pub struct Teacher<'a> {
    pub(super) who: &'a Identity,
    pub(super) variant: Variant,
    pub(super) credentials: Option<&'a Credentials>,
    pub(super) research_line: Option<&'a str>,
    pub(super) teach: &'a mut Teach,
}

impl<'a> Teacher<'a> {
    pub fn hours(&self) -> u32 {
        self.teach.hours
    }
    pub fn courses(&self) -> &[id::Course] {
        &self.teach.courses
    }

    fn title(&self) -> &str {
        self.credentials.map_or("", |c| c.title.as_str())
    }
}

impl<'a> CanTeach for Teacher<'a> {
    fn teach(&mut self, course: &str, topic: &str) -> String {
        let name = &self.who.name;
        let authorized = self.teach.is_assigned(course);
        match (self.variant, authorized) {
            (Variant::Assistant, true) => {
                self.teach.hours += TA_HOURS_PER_CLASS;
                format!("Assistant {name} taught a class on {topic} in {course}")
            }
            (Variant::Assistant, false) => {
                format!("Assistant {name} is not authorized to teach in {course}")
            }
            (Variant::Staff, true) => format!(
                "Professor {name} ({}) taught a class on {topic} in {course}",
                self.title()
            ),
            (Variant::Staff, false) => {
                format!("Professor {name} is not assigned to teach in {course}")
            }
            (_, true) => format!("Doctoral candidate {name} taught a class on {topic} in {course}"),
            (_, false) => {
                format!("Doctoral candidate {name} is not authorized to teach in {course}")
            }
        }
    }

    fn evaluate_students(&self, students: &[id::Student]) -> BTreeMap<id::Student, String> {
        let verdict = match self.variant {
            Variant::Assistant => "Evaluated by teaching assistant".to_string(),
            Variant::Staff => format!(
                "Evaluated by {} with {} years of experience",
                self.title(),
                self.credentials.map_or(0, |c| c.years)
            ),
            _ => "Evaluated by doctoral candidate - advanced level".to_string(),
        };
        students
            .iter()
            .map(|student| (student.clone(), verdict.clone()))
            .collect()
    }

    fn prepare_material(&self, course: &str) -> Vec<String> {
        if !self.teach.is_assigned(course) {
            return vec![];
        }
        match self.variant {
            Variant::Assistant => vec![
                format!("Support material for {course}"),
                format!("Practice exercises for {course}"),
            ],
            Variant::Staff => vec![
                format!("Professional material for {course}"),
                format!(
                    "Case studies in {}",
                    self.credentials.map_or("", |c| c.specialty.as_str())
                ),
                format!("Professional experience applied to {course}"),
                "Assessments and rubrics".to_string(),
            ],
            _ => vec![
                format!("Advanced material for {course}"),
                format!("Current research in {course}"),
                format!("Papers related to {}", self.research_line.unwrap_or("")),
            ],
        }
    }
}

/// [`CanResearch`] view, see [`Student::as_researcher`].
pub struct Researcher<'a> {
    pub(super) who: &'a Identity,
    pub(super) variant: Variant,
    pub(super) credentials: Option<&'a Credentials>,
    pub(super) research: &'a mut Research,
}

impl<'a> Researcher<'a> {
    pub fn directed(&self) -> &[id::Student] {
        &self.research.directed
    }

    fn author(&self) -> String {
        let Identity { name, surname, .. } = self.who;
        match self.credentials {
            Some(creds) => format!("{} {name} {surname}", creds.title),
            None => format!("{name} {surname}"),
        }
    }
}

impl<'a> CanResearch for Researcher<'a> {
    fn research(&self, topic: &str) -> String {
        let name = &self.who.name;
        match self.credentials {
            Some(creds) => format!(
                "{} {name} is conducting advanced research on: {topic}",
                creds.title
            ),
            None => format!("Graduate student {name} is researching: {topic}"),
        }
    }

    fn publish(&mut self, title: &str, content: &str) -> bool {
        let publication = Publication {
            title: title.into(),
            content: content.into(),
            author: self.author(),
            date: Utc::now(),
            specialty: self.credentials.map(|c| c.specialty.clone()),
        };
        log::debug!("`{}` published `{}`", self.who.id, title);
        self.research.publications.push(publication);
        true
    }

    fn publications(&self) -> Vec<Publication> {
        self.research.publications.clone()
    }

    fn supervise_thesis(&mut self, student: &str, topic: &str) -> String {
        let name = &self.who.name;
        match (self.variant, self.credentials) {
            (Variant::Graduate, _) => {
                "Graduate students are not authorized to supervise theses".to_string()
            }
            (Variant::Staff, Some(creds)) => {
                self.research.directed.push(student.into());
                format!(
                    "{} {name} is supervising the thesis of {student} on: {topic}",
                    creds.title
                )
            }
            _ => {
                self.research.directed.push(student.into());
                format!("Doctoral candidate {name} is supervising the thesis of {student} on: {topic}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    prelude! {
        repr::roles::TA_HOURS_PER_CLASS,
    }

    fn maria() -> Identity {
        Identity::new("EST002", "María", "González", "maria.gonzalez@uv.cl")
    }

    #[test]
    fn studier() {
        let mut s = Student::undergrad(maria(), "Civil Engineering");
        s.enroll("ING002");
        let studier = s.as_studier().unwrap();
        assert_eq!(
            studier.study("Algorithms"),
            "María is studying Algorithms for their Civil Engineering degree"
        );
        assert!(studier.take_exam("ING002"));
        assert!(!studier.take_exam("ING001"));
        assert_eq!(studier.current_courses(), vec!["ING002".to_string()]);
    }

    #[test]
    fn assistant_hours() {
        let mut ta = Student::assistant(maria(), "Civil Engineering", &["ING001"]);
        let mut teacher = ta.as_teacher().unwrap();
        assert_eq!(
            teacher.teach("ING001", "Variables"),
            "Assistant María taught a class on Variables in ING001"
        );
        assert_eq!(
            teacher.teach("ING002", "Limits"),
            "Assistant María is not authorized to teach in ING002"
        );
        assert_eq!(teacher.hours(), TA_HOURS_PER_CLASS);
        assert!(teacher.prepare_material("ING002").is_empty());
        assert_eq!(teacher.prepare_material("ING001").len(), 2);
        assert_eq!(ta.teaching_hours(), 2);
        assert_eq!(ta.basic_info().get("ta_hours"), Some("2"));
    }

    #[test]
    fn staff_teaching() {
        let mut prof = Student::staff(maria(), "PhD", "Databases");
        prof.add_experience(12);
        let mut teacher = prof.as_teacher().unwrap();
        assert_eq!(
            teacher.teach("ING001", "SQL"),
            "Professor María is not assigned to teach in ING001"
        );
        assert!(teacher.prepare_material("ING001").is_empty());
        assert!(prof.add_teaching_course("ING001"));
        let mut teacher = prof.as_teacher().unwrap();
        assert_eq!(
            teacher.teach("ING001", "SQL"),
            "Professor María (PhD) taught a class on SQL in ING001"
        );
        assert_eq!(teacher.hours(), 0);
        assert_eq!(
            teacher.prepare_material("ING001")[1],
            "Case studies in Databases"
        );

        let evals = teacher.evaluate_students(&["EST001".to_string(), "EST003".to_string()]);
        assert_eq!(evals.len(), 2);
        assert_eq!(
            evals["EST003"],
            "Evaluated by PhD with 12 years of experience"
        );
    }

    #[test]
    fn publications() {
        let mut grad = Student::graduate(maria(), "MSc", "ML in education");
        let mut researcher = grad.as_researcher().unwrap();
        assert_eq!(
            researcher.research("Clustering"),
            "Graduate student María is researching: Clustering"
        );
        assert!(researcher.publish("ML in education", "Some content"));
        let pubs = researcher.publications();
        assert_eq!(pubs[0].author, "María González");
        assert_eq!(pubs[0].specialty, None);
        assert_eq!(grad.publication_count(), 1);

        let mut prof = Student::staff(maria(), "PhD", "Databases");
        let mut researcher = prof.as_researcher().unwrap();
        assert!(researcher.publish("Indexes", "B-trees everywhere"));
        let pubs = researcher.publications();
        assert_eq!(pubs[0].author, "PhD María González");
        assert_eq!(pubs[0].specialty.as_deref(), Some("Databases"));
    }
}
