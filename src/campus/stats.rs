//! Statistics computed by the campus managers.

prelude! {}

/// Population statistics, see [`campus::StudentManager::statistics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentStats {
    pub total_students: usize,
    /// Sum of the enrollment list lengths of all students.
    pub enrollment_count: usize,
    /// Person count per variant label, variants without people are absent.
    pub by_variant: BTreeMap<&'static str, usize>,
}

impl StudentStats {
    pub(crate) fn compute<'a>(students: impl Iterator<Item = &'a Student>) -> Self {
        let mut slf = Self {
            total_students: 0,
            enrollment_count: 0,
            by_variant: BTreeMap::new(),
        };
        for student in students {
            slf.total_students += 1;
            slf.enrollment_count += student.courses().len();
            *slf.by_variant.entry(student.variant().label()).or_insert(0) += 1;
        }
        slf
    }
}

impl Display for StudentStats {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "{} people, {} enrollment(s)",
            self.total_students, self.enrollment_count
        )?;
        for (label, count) in &self.by_variant {
            write!(fmt, "\n  {label}: {count}")?;
        }
        Ok(())
    }
}

/// Teaching load of an instructor, see [`campus::CourseManager::course_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseLoad {
    pub instructor: id::Student,
    pub course_count: usize,
    pub total_credits: u32,
    pub total_students: usize,
    /// Courses taught, in insertion order.
    pub courses: Vec<Course>,
}

impl CourseLoad {
    pub(crate) fn compute<'a>(
        instructor: impl Into<id::Student>,
        courses: impl Iterator<Item = &'a Course>,
    ) -> Self {
        let courses: Vec<Course> = courses.cloned().collect();
        Self {
            instructor: instructor.into(),
            course_count: courses.len(),
            total_credits: courses.iter().map(|c| u32::from(c.credits())).sum(),
            total_students: courses.iter().map(Course::student_count).sum(),
            courses,
        }
    }
}

impl Display for CourseLoad {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "instructor `{}`: {} course(s), {} credits, {} student(s)",
            self.instructor, self.course_count, self.total_credits, self.total_students
        )?;
        for course in &self.courses {
            write!(fmt, "\n  {course}")?;
        }
        Ok(())
    }
}

/// Statistics over the courses of a term, see [`campus::CourseManager::term_statistics`].
#[derive(Debug, Clone, PartialEq)]
pub struct TermStats {
    pub term: u8,
    pub course_count: usize,
    pub total_credits: u32,
    /// Zero when the term has no courses.
    pub average_credits: f64,
    pub total_students: usize,
    /// Number of courses per credit count.
    pub credit_distribution: BTreeMap<u8, usize>,
    /// Course names, in insertion order.
    pub course_names: Vec<String>,
}

impl TermStats {
    pub(crate) fn compute<'a>(term: u8, courses: impl Iterator<Item = &'a Course>) -> Self {
        let mut slf = Self {
            term,
            course_count: 0,
            total_credits: 0,
            average_credits: 0.0,
            total_students: 0,
            credit_distribution: BTreeMap::new(),
            course_names: vec![],
        };
        for course in courses {
            slf.course_count += 1;
            slf.total_credits += u32::from(course.credits());
            slf.total_students += course.student_count();
            *slf.credit_distribution.entry(course.credits()).or_insert(0) += 1;
            slf.course_names.push(course.name().into());
        }
        slf.average_credits = average(slf.total_credits as usize, slf.course_count);
        slf
    }
}

impl Display for TermStats {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "term {}: {} course(s), {} credits (avg {:.2}), {} student(s)",
            self.term,
            self.course_count,
            self.total_credits,
            self.average_credits,
            self.total_students
        )?;
        if !self.course_names.is_empty() {
            write!(
                fmt,
                "\n  courses: {}",
                self.course_names.iter().show_iter_cs(|name| name)
            )?;
        }
        Ok(())
    }
}

/// Per-term totals in [`OverallStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermSummary {
    pub courses: usize,
    pub credits: u32,
    pub students: usize,
}

/// Statistics over all courses, see [`campus::CourseManager::overall_statistics`].
#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub course_count: usize,
    pub total_credits: u32,
    /// Zero when there are no courses.
    pub average_credits: f64,
    pub total_students: usize,
    /// Zero when there are no courses.
    pub average_students: f64,
    /// Only terms with at least one course appear.
    pub by_term: BTreeMap<u8, TermSummary>,
}

impl OverallStats {
    pub(crate) fn compute<'a>(courses: impl Iterator<Item = &'a Course>) -> Self {
        let mut slf = Self {
            course_count: 0,
            total_credits: 0,
            average_credits: 0.0,
            total_students: 0,
            average_students: 0.0,
            by_term: BTreeMap::new(),
        };
        for course in courses {
            let credits = u32::from(course.credits());
            let students = course.student_count();
            slf.course_count += 1;
            slf.total_credits += credits;
            slf.total_students += students;
            let summary = slf.by_term.entry(course.term()).or_default();
            summary.courses += 1;
            summary.credits += credits;
            summary.students += students;
        }
        slf.average_credits = average(slf.total_credits as usize, slf.course_count);
        slf.average_students = average(slf.total_students, slf.course_count);
        slf
    }
}

impl Display for OverallStats {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "{} course(s), {} credits (avg {:.2}), {} student(s) (avg {:.2})",
            self.course_count,
            self.total_credits,
            self.average_credits,
            self.total_students,
            self.average_students,
        )?;
        for (term, summary) in &self.by_term {
            write!(
                fmt,
                "\n  term {term}: {} course(s), {} credits, {} student(s)",
                summary.courses, summary.credits, summary.students
            )?;
        }
        Ok(())
    }
}

fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    prelude! {
        campus::stats::*,
    }

    fn courses() -> Vec<Course> {
        let mut c1 = Course::new("ING001", "Programming I", 6, 1, "PROF001").unwrap();
        c1.add_student("EST001");
        c1.add_student("EST002");
        let c2 = Course::new("ING002", "Mathematics I", 8, 1, "PROF002").unwrap();
        let mut c3 = Course::new("ING003", "Physics I", 6, 2, "PROF001").unwrap();
        c3.add_student("EST001");
        vec![c1, c2, c3]
    }

    #[test]
    fn empty_stats_are_zero() {
        let overall = OverallStats::compute(std::iter::empty());
        assert_eq!(overall.course_count, 0);
        assert_eq!(overall.average_credits, 0.0);
        assert_eq!(overall.average_students, 0.0);
        assert!(overall.by_term.is_empty());

        let term = TermStats::compute(3, std::iter::empty());
        assert_eq!(term.average_credits, 0.0);
        assert!(term.course_names.is_empty());
    }

    #[test]
    fn term_stats() {
        let courses = courses();
        let stats = TermStats::compute(1, courses.iter().filter(|c| c.term() == 1));
        assert_eq!(stats.course_count, 2);
        assert_eq!(stats.total_credits, 14);
        assert_eq!(stats.average_credits, 7.0);
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.credit_distribution.get(&6), Some(&1));
        assert_eq!(stats.credit_distribution.get(&8), Some(&1));
        assert_eq!(stats.course_names, vec!["Programming I", "Mathematics I"]);
    }

    #[test]
    fn overall_stats() {
        let courses = courses();
        let stats = OverallStats::compute(courses.iter());
        assert_eq!(stats.course_count, 3);
        assert_eq!(stats.total_credits, 20);
        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.average_students, 1.0);
        assert_eq!(
            stats.by_term.get(&2),
            Some(&TermSummary {
                courses: 1,
                credits: 6,
                students: 1
            })
        );
        assert_eq!(
            stats.to_string().lines().nth(1),
            Some("  term 1: 2 course(s), 14 credits, 2 student(s)")
        );
    }

    #[test]
    fn course_load() {
        let courses = courses();
        let load = CourseLoad::compute(
            "PROF001",
            courses.iter().filter(|c| c.instructor() == "PROF001"),
        );
        assert_eq!(load.course_count, 2);
        assert_eq!(load.total_credits, 12);
        assert_eq!(load.total_students, 3);
        assert_eq!(load.courses[1].id(), "ING003");
    }
}
