prelude! {}

pub mod caps;
pub mod idx;
pub mod roles;
pub mod search;
pub mod variant;

pub use caps::{Capability, Caps};
pub use roles::{
    Credentials, Publication, Research, Researcher, Study, Studier, Teach, Teacher, Thesis,
};
pub use search::{Criteria, Field, Query, Value};
pub use variant::Variant;

/// Entity keys.
pub mod id {
    pub type Student = String;
    pub type Course = String;
}

/// Identity and contact data shared by every person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: id::Student,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub enrolled_at: DateTime<Utc>,
}

impl Identity {
    /// Identity enrolled now.
    pub fn new(
        id: impl Into<id::Student>,
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            enrolled_at: Utc::now(),
        }
    }

    pub fn enrolled_at(mut self, date: DateTime<Utc>) -> Self {
        self.enrolled_at = date;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// A person record: students of all kinds, and staff.
///
/// The [`Variant`] decides which capability bundles are present, the constructors are the only
/// way to build a student and they maintain this correspondence:
///
/// | variant     | study | teach | research | extras                |
/// |-------------|-------|-------|----------|-----------------------|
/// | `Undergrad` | ✓     |       |          |                       |
/// | `Assistant` | ✓     | ✓     |          |                       |
/// | `Graduate`  | ✓     |       | ✓        | thesis                |
/// | `Doctoral`  | ✓     | ✓     | ✓        | thesis, research line |
/// | `Staff`     |       | ✓     | ✓        | credentials           |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    who: Identity,
    courses: SmallVec<[id::Course; 8]>,
    variant: Variant,
    study: Option<Study>,
    teach: Option<Teach>,
    research: Option<Research>,
    thesis: Option<Thesis>,
    research_line: Option<String>,
    credentials: Option<Credentials>,
}

/// # Constructors
impl Student {
    fn new(who: Identity, variant: Variant) -> Self {
        Self {
            who,
            courses: smallvec![],
            variant,
            study: None,
            teach: None,
            research: None,
            thesis: None,
            research_line: None,
            credentials: None,
        }
    }

    pub fn undergrad(who: Identity, career: impl Into<String>) -> Self {
        let mut slf = Self::new(who, Variant::Undergrad);
        slf.study = Some(Study::new(career));
        slf
    }

    /// Teaching assistant for the `assisted` courses.
    pub fn assistant<S: AsRef<str>>(
        who: Identity,
        career: impl Into<String>,
        assisted: &[S],
    ) -> Self {
        let mut slf = Self::new(who, Variant::Assistant);
        slf.study = Some(Study::new(career));
        slf.teach = Some(Teach::new(assisted));
        slf
    }

    pub fn graduate(
        who: Identity,
        career: impl Into<String>,
        thesis_topic: impl Into<String>,
    ) -> Self {
        let mut slf = Self::new(who, Variant::Graduate);
        slf.study = Some(Study::new(career));
        slf.research = Some(Research::default());
        slf.thesis = Some(Thesis {
            topic: thesis_topic.into(),
            advisor: String::new(),
        });
        slf
    }

    pub fn doctoral(
        who: Identity,
        career: impl Into<String>,
        thesis_topic: impl Into<String>,
        research_line: impl Into<String>,
    ) -> Self {
        let mut slf = Self::graduate(who, career, thesis_topic);
        slf.variant = Variant::Doctoral;
        slf.teach = Some(Teach::default());
        slf.research_line = Some(research_line.into());
        slf
    }

    pub fn staff(who: Identity, title: impl Into<String>, specialty: impl Into<String>) -> Self {
        let mut slf = Self::new(who, Variant::Staff);
        slf.teach = Some(Teach::default());
        slf.research = Some(Research::default());
        slf.credentials = Some(Credentials {
            title: title.into(),
            specialty: specialty.into(),
            years: 0,
        });
        slf
    }
}

/// # Accessors
impl Student {
    #[inline]
    pub fn id(&self) -> &str {
        &self.who.id
    }
    #[inline]
    pub fn name(&self) -> &str {
        &self.who.name
    }
    #[inline]
    pub fn surname(&self) -> &str {
        &self.who.surname
    }
    #[inline]
    pub fn email(&self) -> &str {
        &self.who.email
    }
    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.who.enrolled_at
    }
    pub fn identity(&self) -> &Identity {
        &self.who
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn caps(&self) -> Caps {
        self.variant.caps()
    }
    pub fn can(&self, cap: Capability) -> bool {
        self.caps().has(cap)
    }

    /// Enrolled course ids, in enrollment order.
    pub fn courses(&self) -> &[id::Course] {
        &self.courses
    }
    pub fn is_enrolled(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }

    pub fn career(&self) -> Option<&str> {
        self.study.as_ref().map(|s| s.career.as_str())
    }
    pub fn term(&self) -> Option<u8> {
        self.study.as_ref().map(|s| s.term)
    }
    pub fn teaching_courses(&self) -> &[id::Course] {
        self.teach
            .as_ref()
            .map(|t| t.courses.as_slice())
            .unwrap_or(&[])
    }
    pub fn teaching_hours(&self) -> u32 {
        self.teach.as_ref().map_or(0, |t| t.hours)
    }
    pub fn thesis_topic(&self) -> Option<&str> {
        self.thesis.as_ref().map(|t| t.topic.as_str())
    }
    /// Empty if no advisor was assigned yet.
    pub fn advisor(&self) -> Option<&str> {
        self.thesis.as_ref().map(|t| t.advisor.as_str())
    }
    pub fn research_line(&self) -> Option<&str> {
        self.research_line.as_deref()
    }
    pub fn directed_theses(&self) -> &[id::Student] {
        self.research
            .as_ref()
            .map(|r| r.directed.as_slice())
            .unwrap_or(&[])
    }
    pub fn publication_count(&self) -> usize {
        self.research.as_ref().map_or(0, |r| r.publications.len())
    }
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// # Mutators
///
/// Variant-specific mutators return `false` and do nothing when the variant does not support them.
impl Student {
    /// Adds `course` to the enrolled courses, false if already there.
    pub fn enroll(&mut self, course: impl Into<id::Course>) -> bool {
        let course = course.into();
        if self.is_enrolled(&course) {
            return false;
        }
        self.courses.push(course);
        true
    }
    /// Removes `course` from the enrolled courses, false if absent.
    pub fn unenroll(&mut self, course: &str) -> bool {
        if let Some(pos) = self.courses.iter().position(|c| c == course) {
            let _ = self.courses.remove(pos);
            true
        } else {
            false
        }
    }

    /// False if not studying, or if the term counter is saturated.
    pub fn advance_term(&mut self) -> bool {
        let Some(study) = self.study.as_mut() else {
            return false;
        };
        match study.term.checked_add(1) {
            Some(term) => {
                study.term = term;
                true
            }
            None => false,
        }
    }

    /// Grants teaching rights on `course`, false if already granted or not a teaching variant.
    pub fn add_teaching_course(&mut self, course: &str) -> bool {
        self.teach
            .as_mut()
            .map_or(false, |teach| teach.add_course(course))
    }

    pub fn assign_advisor(&mut self, advisor: impl Into<String>) -> bool {
        if let Some(thesis) = self.thesis.as_mut() {
            thesis.advisor = advisor.into();
            true
        } else {
            false
        }
    }

    /// False if not staff, or if the total would overflow, experience is unchanged then.
    pub fn add_experience(&mut self, years: u32) -> bool {
        let Some(creds) = self.credentials.as_mut() else {
            return false;
        };
        match creds.years.checked_add(years) {
            Some(total) => {
                creds.years = total;
                true
            }
            None => false,
        }
    }
}

/// # Capabilities
impl Student {
    pub fn as_studier(&self) -> Option<Studier<'_>> {
        let study = self.study.as_ref()?;
        Some(Studier {
            who: &self.who,
            courses: &self.courses,
            study,
        })
    }

    pub fn as_teacher(&mut self) -> Option<Teacher<'_>> {
        let teach = self.teach.as_mut()?;
        Some(Teacher {
            who: &self.who,
            variant: self.variant,
            credentials: self.credentials.as_ref(),
            research_line: self.research_line.as_deref(),
            teach,
        })
    }

    pub fn as_researcher(&mut self) -> Option<Researcher<'_>> {
        let research = self.research.as_mut()?;
        Some(Researcher {
            who: &self.who,
            variant: self.variant,
            credentials: self.credentials.as_ref(),
            research,
        })
    }

    /// Summary of the person, variant-specific details included.
    pub fn basic_info(&self) -> BasicInfo {
        let mut details: SmallVec<[(&'static str, String); 8]> = smallvec![];
        if let Some(study) = self.study.as_ref() {
            details.push(("career", study.career.clone()));
            details.push(("term", study.term.to_string()));
        }
        match self.variant {
            Variant::Undergrad => (),
            Variant::Assistant => {
                details.push(("assisted_courses", self.teaching_courses().join(", ")));
                details.push(("ta_hours", self.teaching_hours().to_string()));
            }
            Variant::Graduate | Variant::Doctoral => {
                if let Some(thesis) = self.thesis.as_ref() {
                    details.push(("thesis_topic", thesis.topic.clone()));
                    details.push(("advisor", thesis.advisor.clone()));
                }
                details.push(("publications", self.publication_count().to_string()));
                if let Some(line) = self.research_line.as_ref() {
                    details.push(("research_line", line.clone()));
                    details.push((
                        "directed_theses",
                        self.directed_theses().len().to_string(),
                    ));
                    details.push(("teaching_courses", self.teaching_courses().join(", ")));
                }
            }
            Variant::Staff => {
                if let Some(creds) = self.credentials.as_ref() {
                    details.push(("title", creds.title.clone()));
                    details.push(("specialty", creds.specialty.clone()));
                    details.push(("years_of_experience", creds.years.to_string()));
                }
                details.push((
                    "teaching_courses",
                    self.teaching_courses().len().to_string(),
                ));
                details.push(("publications", self.publication_count().to_string()));
            }
        }
        BasicInfo {
            id: self.who.id.clone(),
            name: self.who.name.clone(),
            surname: self.who.surname.clone(),
            label: self.variant.label(),
            details,
        }
    }
}

impl Entity for Student {
    fn id(&self) -> &str {
        &self.who.id
    }
    fn field(&self, name: &str) -> Option<Field<'_>> {
        let field = match name {
            "id" => Field::Key(&self.who.id),
            "name" => Field::Text(&self.who.name),
            "surname" => Field::Text(&self.who.surname),
            "email" => Field::Text(&self.who.email),
            "variant" => Field::Text(self.variant.label()),
            "career" => Field::Text(self.career()?),
            "term" => Field::Int(self.term()?.into()),
            "title" => Field::Text(&self.credentials.as_ref()?.title),
            "specialty" => Field::Text(&self.credentials.as_ref()?.specialty),
            _ => return None,
        };
        Some(field)
    }
}

impl Display for Student {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Identity { name, surname, .. } = &self.who;
        write!(fmt, "{}: {name} {surname}", self.variant.label())?;
        match self.variant {
            Variant::Undergrad => write!(
                fmt,
                " - {} (term {})",
                self.career().unwrap_or(""),
                self.term().unwrap_or(0)
            ),
            Variant::Assistant => write!(
                fmt,
                " - {} (assisting {} courses)",
                self.career().unwrap_or(""),
                self.teaching_courses().len()
            ),
            Variant::Graduate => write!(fmt, " - thesis: {}", self.thesis_topic().unwrap_or("")),
            Variant::Doctoral => write!(fmt, " - {}", self.research_line().unwrap_or("")),
            Variant::Staff => match self.credentials.as_ref() {
                Some(creds) => write!(
                    fmt,
                    " - {}, {} ({} years exp.)",
                    creds.title, creds.specialty, creds.years
                ),
                None => Ok(()),
            },
        }
    }
}

/// Summary of a person, see [`Student::basic_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicInfo {
    pub id: id::Student,
    pub name: String,
    pub surname: String,
    pub label: &'static str,
    pub details: SmallVec<[(&'static str, String); 8]>,
}

impl BasicInfo {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A course, its enrolled students are kept in enrollment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: id::Course,
    name: String,
    credits: u8,
    term: u8,
    instructor: id::Student,
    students: Vec<id::Student>,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Legal credit counts.
    pub const CREDITS: std::ops::RangeInclusive<u8> = 1..=12;
    /// Legal term numbers.
    pub const TERMS: std::ops::RangeInclusive<u8> = 1..=10;

    /// Constructor, fails if `credits` or `term` is out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # campus_rs::prelude! {}
    /// let course = Course::new("ING001", "Programming I", 6, 1, "PROF001").unwrap();
    /// assert_eq!(course.credits(), 6);
    /// assert!(course.students().is_empty());
    ///
    /// assert!(Course::new("ING002", "Calculus", 13, 1, "PROF002").is_err());
    /// assert!(Course::new("ING002", "Calculus", 6, 0, "PROF002").is_err());
    /// ```
    pub fn new(
        id: impl Into<id::Course>,
        name: impl Into<String>,
        credits: u8,
        term: u8,
        instructor: impl Into<id::Student>,
    ) -> Res<Self> {
        let id = id.into();
        if !Self::CREDITS.contains(&credits) {
            return Err(error!(@invalid("credit count") credits.to_string()).with_context(
                format!(
                    "course `{id}` needs between {} and {} credits",
                    Self::CREDITS.start(),
                    Self::CREDITS.end()
                ),
            ));
        }
        if !Self::TERMS.contains(&term) {
            return Err(error!(@invalid("term") term.to_string()).with_context(format!(
                "course `{id}` must be taught between terms {} and {}",
                Self::TERMS.start(),
                Self::TERMS.end()
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            credits,
            term,
            instructor: instructor.into(),
            students: Vec::with_capacity(7),
            created_at: Utc::now(),
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[inline]
    pub fn credits(&self) -> u8 {
        self.credits
    }
    #[inline]
    pub fn term(&self) -> u8 {
        self.term
    }
    pub fn instructor(&self) -> &str {
        &self.instructor
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn students(&self) -> &[id::Student] {
        &self.students
    }
    pub fn student_count(&self) -> usize {
        self.students.len()
    }
    pub fn has_student(&self, student: &str) -> bool {
        self.students.iter().any(|s| s == student)
    }

    /// False if already enrolled.
    pub fn add_student(&mut self, student: impl Into<id::Student>) -> bool {
        let student = student.into();
        if self.has_student(&student) {
            return false;
        }
        self.students.push(student);
        true
    }
    /// False if not enrolled.
    pub fn remove_student(&mut self, student: &str) -> bool {
        if let Some(pos) = self.students.iter().position(|s| s == student) {
            let _ = self.students.remove(pos);
            true
        } else {
            false
        }
    }

    /// Copies the enrollments and creation date of `old` into `self`.
    ///
    /// Used when a course is replaced by an updated version of itself.
    pub(crate) fn carry_over(&mut self, old: &Course) {
        self.students = old.students.clone();
        self.created_at = old.created_at;
    }
}

impl Entity for Course {
    fn id(&self) -> &str {
        &self.id
    }
    fn field(&self, name: &str) -> Option<Field<'_>> {
        let field = match name {
            "id" => Field::Key(&self.id),
            "name" => Field::Text(&self.name),
            "credits" => Field::Int(self.credits.into()),
            "term" => Field::Int(self.term.into()),
            "instructor_id" => Field::Key(&self.instructor),
            _ => return None,
        };
        Some(field)
    }
}

impl Display for Course {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "Course: {} ({}) - {} credits",
            self.name, self.id, self.credits
        )
    }
}
