//! Campus context.
//!
//! The main context is [`Campus`], which owns the student and course repositories. Business
//! operations go through two views borrowing the campus mutably:
//!
//! - [`StudentManager`], obtained with [`Campus::student_manager`], creates people of every
//!   variant and handles enrollment;
//! - [`CourseManager`], obtained with [`Campus::course_manager`], creates and updates courses and
//!   computes course statistics.
//!
//! Enrollment touches both repositories, which is why both live in the same context.

prelude! {}

/// Logs a refused operation as a warning, and returns the error.
macro_rules! refuse {
    ($($input:tt)+) => {{
        let err = error!($($input)+);
        log::warn!("{}", err);
        return Err(err);
    }};
}

pub mod courses;
pub mod stats;
pub mod students;

pub use courses::{CourseManager, CoursePatch};
pub use stats::{CourseLoad, OverallStats, StudentStats, TermStats, TermSummary};
pub use students::StudentManager;

/// Owns the student and course repositories.
///
/// # Examples
///
/// ```rust
/// # campus_rs::prelude! {}
/// let mut campus = Campus::new();
/// campus
///     .course_manager()
///     .create_course("C1", "Programming I", 6, 1, "P1")
///     .unwrap();
/// let mut students = campus.student_manager();
/// students
///     .create_undergrad(Identity::new("S1", "Juan", "Pérez", "juan@uv.cl"), "CS")
///     .unwrap();
/// students.enroll("S1", "C1").unwrap();
/// assert_eq!(students.statistics().enrollment_count, 1);
///
/// // cannot remove a course students are enrolled in
/// assert!(campus.course_manager().delete_course("C1").unwrap_err().is_in_use());
/// campus.student_manager().unenroll("S1", "C1").unwrap();
/// campus.course_manager().delete_course("C1").unwrap();
/// campus.check_enrollments().unwrap();
/// ```
pub struct Campus {
    students: Repo<Student>,
    courses: Repo<Course>,
}

impl Default for Campus {
    fn default() -> Self {
        Self::new()
    }
}

impl Campus {
    /// Constructor.
    pub fn with_capacity(student_capa: usize, course_capa: usize) -> Self {
        Self {
            students: Repo::with_capacity("student", student_capa),
            courses: Repo::with_capacity("course", course_capa),
        }
    }
    pub fn new() -> Self {
        Self::with_capacity(7, 7)
    }

    pub fn students(&self) -> &Repo<Student> {
        &self.students
    }
    pub fn courses(&self) -> &Repo<Course> {
        &self.courses
    }

    pub fn student_manager(&mut self) -> StudentManager<'_> {
        StudentManager::new(self)
    }
    pub fn course_manager(&mut self) -> CourseManager<'_> {
        CourseManager::new(self)
    }

    /// Checks that enrollments are symmetric.
    ///
    /// - every course a student lists exists and lists the student back;
    /// - every student a course lists exists and lists the course back.
    ///
    /// Deleting a student does not touch the courses they were enrolled in, so this check fails
    /// after deleting an enrolled student.
    pub fn check_enrollments(&self) -> Res<()> {
        let mut errors = 0;

        for student in self.students.iter() {
            for c_id in student.courses() {
                match self.courses.get(c_id) {
                    None => {
                        errors += 1;
                        log::error!("student `{}` lists unknown course `{}`", student.id(), c_id);
                    }
                    Some(course) if !course.has_student(student.id()) => {
                        errors += 1;
                        log::error!(
                            "student `{}` lists course `{}`, which does not list them",
                            student.id(),
                            c_id
                        );
                    }
                    Some(_) => (),
                }
            }
        }

        for course in self.courses.iter() {
            for s_id in course.students() {
                match self.students.get(s_id) {
                    None => {
                        errors += 1;
                        log::error!("course `{}` lists unknown student `{}`", course.id(), s_id);
                    }
                    Some(student) if !student.is_enrolled(course.id()) => {
                        errors += 1;
                        log::error!(
                            "course `{}` lists student `{}`, who does not list it",
                            course.id(),
                            s_id
                        );
                    }
                    Some(_) => (),
                }
            }
        }

        if errors > 0 {
            bail!("found {} asymmetric enrollment(s)", errors)
        } else {
            Ok(())
        }
    }

    pub fn to_pretty_string(&self) -> String {
        let mut res = String::with_capacity(113);

        macro_rules! post {
            ($pref:expr, line $($interp_str:tt)*) => {{
                if !res.is_empty() {
                    res.push('\n');
                }
                res.push_str($pref);
                res.push_str(&format!($($interp_str)*));
            }};
        }

        post!("", line "- students ({})", self.students.len());
        for student in self.students.iter() {
            post!("  ", line "{} #{}", student, student.id());
            post!("    ", line "capabilities: {}", student.caps());
            if !student.courses().is_empty() {
                let courses = student.courses().iter().show_iter_cs(|c| c);
                post!("    ", line "courses: {}", courses);
            }
            if !student.teaching_courses().is_empty() {
                let courses = student.teaching_courses().iter().show_iter_cs(|c| c);
                post!("    ", line "teaches: {}", courses);
            }
        }

        post!("", line "- courses ({})", self.courses.len());
        for course in self.courses.iter() {
            post!("  ", line "{} #{}", course, course.id());
            post!("    ", line "term {}, instructor `{}`", course.term(), course.instructor());
            if !course.students().is_empty() {
                let students = course.students().iter().show_iter_cs(|s| s);
                post!("    ", line "students: {}", students);
            }
        }

        res.shrink_to_fit();
        res
    }
}
