//! Course management.

prelude! {
    campus::{CourseLoad, OverallStats, TermStats},
}

/// Partial course update, see [`CourseManager::update_course`].
///
/// Unset fields keep their current value.
///
/// ```rust
/// # campus_rs::prelude! { campus::CoursePatch }
/// let patch = CoursePatch::new().credits(8).instructor("PROF002");
/// assert_eq!(patch.credits, Some(8));
/// assert!(patch.name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub credits: Option<u8>,
    pub term: Option<u8>,
    pub instructor: Option<id::Student>,
}

impl CoursePatch {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn credits(mut self, credits: u8) -> Self {
        self.credits = Some(credits);
        self
    }
    pub fn term(mut self, term: u8) -> Self {
        self.term = Some(term);
        self
    }
    pub fn instructor(mut self, instructor: impl Into<id::Student>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.credits.is_none()
            && self.term.is_none()
            && self.instructor.is_none()
    }
}

/// Course-side operations over a [`Campus`], see [`Campus::course_manager`].
pub struct CourseManager<'a> {
    campus: &'a mut Campus,
}

impl<'a> CourseManager<'a> {
    pub(super) fn new(campus: &'a mut Campus) -> Self {
        Self { campus }
    }

    fn courses(&self) -> &Repo<Course> {
        &self.campus.courses
    }
}

/// # Mutation
impl<'a> CourseManager<'a> {
    /// Creates a course and yields it.
    ///
    /// Fails if the id is taken, or if `credits` or `term` is out of range (see
    /// [`Course::CREDITS`] and [`Course::TERMS`]).
    pub fn create_course(
        &mut self,
        id: impl Into<id::Course>,
        name: impl Into<String>,
        credits: u8,
        term: u8,
        instructor: impl Into<id::Student>,
    ) -> Res<&Course> {
        let id = id.into();
        if self.courses().contains(&id) {
            refuse!(@redef("course") id)
        }
        let course = match Course::new(id.clone(), name, credits, term, instructor) {
            Ok(course) => course,
            Err(err) => {
                log::warn!("{}", err);
                return Err(err);
            }
        };
        if !self.campus.courses.add(course) {
            refuse!(@redef("course") id)
        }
        log::debug!("created course `{}`", id);
        self.courses()
            .get(&id)
            .ok_or_else(|| error!(@unknown("course") id))
    }

    /// Replaces a course by a patched version of itself.
    ///
    /// The replacement is validated like a new course, and keeps the enrolled students and the
    /// creation date of the original.
    pub fn update_course(&mut self, id: &str, patch: CoursePatch) -> Res<&Course> {
        let Some(old) = self.courses().get(id) else {
            refuse!(@unknown("course") id)
        };
        let CoursePatch {
            name,
            credits,
            term,
            instructor,
        } = patch;
        let mut course = match Course::new(
            id,
            name.unwrap_or_else(|| old.name().into()),
            credits.unwrap_or(old.credits()),
            term.unwrap_or(old.term()),
            instructor.unwrap_or_else(|| old.instructor().into()),
        ) {
            Ok(course) => course,
            Err(err) => {
                let err = err.with_context(format!("while updating course `{}`", id));
                log::warn!("{}", err);
                return Err(err);
            }
        };
        course.carry_over(old);

        if !self.campus.courses.update(id, course) {
            refuse!(@unknown("course") id)
        }
        log::debug!("updated course `{}`", id);
        self.courses()
            .get(id)
            .ok_or_else(|| error!(@unknown("course") id))
    }

    /// Removes a course and yields it, fails if any student is enrolled.
    pub fn delete_course(&mut self, id: &str) -> Res<Course> {
        let Some(course) = self.courses().get(id) else {
            refuse!(@unknown("course") id)
        };
        if course.student_count() > 0 {
            let err = error!(@in_use("course") id).with_context(format!(
                "{} student(s) still enrolled",
                course.student_count()
            ));
            log::warn!("{}", err);
            return Err(err);
        }
        self.campus
            .courses
            .remove(id)
            .ok_or_else(|| error!(@unknown("course") id))
    }
}

/// # Queries
impl<'a> CourseManager<'a> {
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses().get(id)
    }
    /// Courses in creation order.
    pub fn list(&self) -> Vec<&Course> {
        self.courses().iter().collect()
    }
    pub fn list_by_term(&self, term: u8) -> Vec<&Course> {
        self.courses().filter(|course| course.term() == term)
    }
    pub fn list_by_instructor(&self, instructor: &str) -> Vec<&Course> {
        self.courses()
            .filter(|course| course.instructor() == instructor)
    }
    pub fn search(&self, criteria: &Criteria) -> Res<Vec<&Course>> {
        self.courses().search(criteria)
    }

    /// Students enrolled in a course, empty if the course does not exist.
    pub fn students_of(&self, id: &str) -> Vec<id::Student> {
        self.get(id)
            .map(|course| course.students().to_vec())
            .unwrap_or_default()
    }

    /// Sum of the credits of the courses of a term.
    pub fn term_credits(&self, term: u8) -> u32 {
        self.courses()
            .iter()
            .filter(|course| course.term() == term)
            .map(|course| u32::from(course.credits()))
            .sum()
    }
}

/// # Statistics
impl<'a> CourseManager<'a> {
    pub fn course_load(&self, instructor: &str) -> CourseLoad {
        CourseLoad::compute(
            instructor,
            self.courses()
                .iter()
                .filter(|course| course.instructor() == instructor),
        )
    }

    pub fn term_statistics(&self, term: u8) -> TermStats {
        TermStats::compute(
            term,
            self.courses().iter().filter(|course| course.term() == term),
        )
    }

    pub fn overall_statistics(&self) -> OverallStats {
        OverallStats::compute(self.courses().iter())
    }
}
