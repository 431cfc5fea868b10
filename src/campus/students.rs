//! Student management.

prelude! {
    campus::StudentStats,
    repr::BasicInfo,
}

/// Student-side operations over a [`Campus`], see [`Campus::student_manager`].
///
/// Creation fails on duplicate ids, enrollment keeps both sides of the student/course relation in
/// sync.
pub struct StudentManager<'a> {
    campus: &'a mut Campus,
}

impl<'a> StudentManager<'a> {
    pub(super) fn new(campus: &'a mut Campus) -> Self {
        Self { campus }
    }

    fn insert(&mut self, student: Student) -> Res<&mut Student> {
        let id = student.id().to_string();
        if !self.campus.students.add(student) {
            refuse!(@redef("student") id)
        }
        log::debug!("created student `{}`", id);
        self.campus
            .students
            .get_mut(&id)
            .ok_or_else(|| error!(@unknown("student") id))
    }

    fn check_fresh(&self, who: &Identity) -> Res<()> {
        if self.campus.students.contains(&who.id) {
            refuse!(@redef("student") &who.id)
        }
        Ok(())
    }
}

/// # Creation
///
/// All creation functions fail if the id is already taken, and yield the stored student.
impl<'a> StudentManager<'a> {
    pub fn create_undergrad(
        &mut self,
        who: Identity,
        career: impl Into<String>,
    ) -> Res<&mut Student> {
        self.check_fresh(&who)?;
        self.insert(Student::undergrad(who, career))
    }

    /// Teaching assistant for the `assisted` courses, which can be empty.
    pub fn create_assistant<S: AsRef<str>>(
        &mut self,
        who: Identity,
        career: impl Into<String>,
        assisted: &[S],
    ) -> Res<&mut Student> {
        self.check_fresh(&who)?;
        self.insert(Student::assistant(who, career, assisted))
    }

    pub fn create_graduate(
        &mut self,
        who: Identity,
        career: impl Into<String>,
        thesis_topic: impl Into<String>,
    ) -> Res<&mut Student> {
        self.check_fresh(&who)?;
        self.insert(Student::graduate(who, career, thesis_topic))
    }

    pub fn create_doctoral(
        &mut self,
        who: Identity,
        career: impl Into<String>,
        thesis_topic: impl Into<String>,
        research_line: impl Into<String>,
    ) -> Res<&mut Student> {
        self.check_fresh(&who)?;
        self.insert(Student::doctoral(
            who,
            career,
            thesis_topic,
            research_line,
        ))
    }

    pub fn create_staff(
        &mut self,
        who: Identity,
        title: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Res<&mut Student> {
        self.check_fresh(&who)?;
        self.insert(Student::staff(who, title, specialty))
    }
}

/// # Enrollment
impl<'a> StudentManager<'a> {
    /// Enrolls a student in a course.
    ///
    /// Both sides are staged on copies first, and the enrollment is refused before anything is
    /// stored unless both sides accept it.
    pub fn enroll(&mut self, student_id: &str, course_id: &str) -> Res<()> {
        let (mut student, mut course) = self.fetch_pair(student_id, course_id)?;
        if !student.enroll(course_id) {
            refuse!(@redef("enrollment") format!("{student_id} in {course_id}"))
        }
        if !course.add_student(student_id) {
            refuse!(
                "course `{}` already lists student `{}`, enrollment refused",
                course_id,
                student_id
            )
        }
        self.commit(student, course)?;
        log::debug!("enrolled `{}` in `{}`", student_id, course_id);
        Ok(())
    }

    /// Inverse of [`Self::enroll`], fails if either side does not list the other.
    pub fn unenroll(&mut self, student_id: &str, course_id: &str) -> Res<()> {
        let (mut student, mut course) = self.fetch_pair(student_id, course_id)?;
        if !student.unenroll(course_id) {
            refuse!(@unknown("enrollment") format!("{student_id} in {course_id}"))
        }
        if !course.remove_student(student_id) {
            refuse!(
                "course `{}` does not list student `{}`, unenrollment refused",
                course_id,
                student_id
            )
        }
        self.commit(student, course)?;
        log::debug!("unenrolled `{}` from `{}`", student_id, course_id);
        Ok(())
    }

    /// Copies of a student and a course.
    fn fetch_pair(&self, student_id: &str, course_id: &str) -> Res<(Student, Course)> {
        let Some(student) = self.campus.students.get(student_id) else {
            refuse!(@unknown("student") student_id)
        };
        let Some(course) = self.campus.courses.get(course_id) else {
            refuse!(@unknown("course") course_id)
        };
        Ok((student.clone(), course.clone()))
    }

    /// Stores a staged student and course.
    ///
    /// Both ids were just fetched under the same exclusive borrow, so the course store cannot fail
    /// in practice. If it ever does the previous student is put back.
    fn commit(&mut self, student: Student, course: Course) -> Res<()> {
        let student_id = student.id().to_string();
        let course_id = course.id().to_string();
        let Some(prev) = self.campus.students.replace(&student_id, student) else {
            refuse!(@unknown("student") student_id)
        };
        if !self.campus.courses.update(&course_id, course) {
            let _ = self.campus.students.replace(&student_id, prev);
            refuse!(
                "failed to store course `{}`, changes to student `{}` rolled back",
                course_id,
                student_id
            )
        }
        Ok(())
    }
}

/// # Queries
impl<'a> StudentManager<'a> {
    pub fn get(&self, id: &str) -> Option<&Student> {
        self.campus.students.get(id)
    }
    /// Mutable access to a stored student.
    ///
    /// Enrollments should go through [`Self::enroll`] and [`Self::unenroll`], which keep courses in
    /// sync.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.campus.students.get_mut(id)
    }

    /// Students in creation order.
    pub fn list(&self) -> Vec<&Student> {
        self.campus.students.iter().collect()
    }
    pub fn search(&self, criteria: &Criteria) -> Res<Vec<&Student>> {
        self.campus.students.search(criteria)
    }
    /// Students listing `course_id` among their enrollments.
    pub fn enrolled_in(&self, course_id: &str) -> Vec<&Student> {
        self.campus
            .students
            .filter(|student| student.is_enrolled(course_id))
    }

    pub fn basic_info(&self, id: &str) -> Option<BasicInfo> {
        self.get(id).map(Student::basic_info)
    }

    pub fn statistics(&self) -> StudentStats {
        StudentStats::compute(self.campus.students.iter())
    }
}

/// # Deletion
impl<'a> StudentManager<'a> {
    /// Removes a student.
    ///
    /// Courses the student is enrolled in are left untouched, see [`Campus::check_enrollments`].
    pub fn delete(&mut self, id: &str) -> Res<Student> {
        let Some(student) = self.campus.students.remove(id) else {
            refuse!(@unknown("student") id)
        };
        if !student.courses().is_empty() {
            log::warn!(
                "deleted student `{}` is still listed by {} course(s)",
                id,
                student.courses().len()
            );
        }
        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    prelude! {}

    fn identity(id: &str, name: &str, surname: &str) -> Identity {
        let email = format!("{}.{}@uv.cl", name, surname).to_lowercase();
        Identity::new(id, name, surname, email)
    }

    fn campus() -> Campus {
        let mut campus = Campus::new();
        let mut courses = campus.course_manager();
        courses
            .create_course("ING001", "Programming I", 6, 1, "PROF001")
            .unwrap();
        courses
            .create_course("ING002", "Mathematics I", 8, 1, "PROF002")
            .unwrap();
        courses
            .create_course("ING003", "Physics I", 6, 2, "PROF003")
            .unwrap();

        let mut students = campus.student_manager();
        students
            .create_undergrad(
                identity("EST001", "Juan", "Perez"),
                "Computer Engineering",
            )
            .unwrap();
        students
            .create_assistant(
                identity("EST002", "Maria", "Gonzalez"),
                "Civil Engineering",
                &["ING001"],
            )
            .unwrap();
        students
            .create_graduate(
                identity("EST003", "Carlos", "Rodriguez"),
                "MSc in Computer Science",
                "Machine learning in education",
            )
            .unwrap();
        students
            .create_doctoral(
                identity("EST004", "Ana", "Lopez"),
                "PhD in Computer Science",
                "AI in educational systems",
                "Artificial intelligence",
            )
            .unwrap();
        students
            .create_staff(
                identity("PROF001", "Pedro", "Martinez"),
                "PhD in Science",
                "Programming",
            )
            .unwrap();
        campus
    }

    #[test]
    fn duplicate_creation_fails() {
        let mut campus = campus();
        let before = campus.students().get_all();
        let mut students = campus.student_manager();
        let err = students
            .create_graduate(identity("EST001", "Other", "Person"), "MSc", "Topic")
            .unwrap_err();
        assert!(err.is_redef());
        assert_eq!(err.to_string(), "illegal redefinition of student `EST001`");
        assert_eq!(campus.students().get_all(), before);
    }

    #[test]
    fn enrollment_is_symmetric() {
        let mut campus = campus();
        let mut students = campus.student_manager();
        students.enroll("EST001", "ING001").unwrap();
        students.enroll("EST002", "ING001").unwrap();

        assert!(students.get("EST001").unwrap().is_enrolled("ING001"));
        let ids: Vec<&str> = students
            .enrolled_in("ING001")
            .into_iter()
            .map(|s| s.id())
            .collect();
        assert_eq!(ids, vec!["EST001", "EST002"]);
        assert_eq!(
            campus.courses().get("ING001").unwrap().students(),
            &["EST001".to_string(), "EST002".to_string()]
        );

        let mut students = campus.student_manager();
        students.unenroll("EST001", "ING001").unwrap();
        assert!(!students.get("EST001").unwrap().is_enrolled("ING001"));
        assert!(!campus.courses().get("ING001").unwrap().has_student("EST001"));
        campus.check_enrollments().unwrap();
    }

    #[test]
    fn enrollment_failures() {
        let mut campus = campus();
        let mut students = campus.student_manager();
        assert!(students.enroll("EST999", "ING001").unwrap_err().is_unknown());
        assert!(students.enroll("EST001", "ING999").unwrap_err().is_unknown());
        students.enroll("EST001", "ING001").unwrap();
        assert!(students.enroll("EST001", "ING001").unwrap_err().is_redef());
        assert!(students.unenroll("EST001", "ING002").unwrap_err().is_unknown());
        assert_eq!(students.statistics().enrollment_count, 1);
    }

    #[test]
    fn course_side_refusal_stores_nothing() {
        let mut campus = campus();
        let mut students = campus.student_manager();
        students.enroll("EST001", "ING001").unwrap();
        // the course keeps listing the deleted student
        students.delete("EST001").unwrap();
        students
            .create_undergrad(identity("EST001", "Juan", "Perez"), "Computer Engineering")
            .unwrap();
        let before = students.get("EST001").cloned().unwrap();

        let err = students.enroll("EST001", "ING001").unwrap_err();
        assert_eq!(
            err.to_string(),
            "course `ING001` already lists student `EST001`, enrollment refused"
        );
        assert_eq!(students.get("EST001"), Some(&before));
        assert!(before.courses().is_empty());
    }

    #[test]
    fn delete_is_unconditional() {
        let mut campus = campus();
        let mut students = campus.student_manager();
        students.enroll("EST001", "ING001").unwrap();
        let juan = students.delete("EST001").unwrap();
        assert_eq!(juan.courses(), &["ING001".to_string()]);
        assert!(students.get("EST001").is_none());
        assert!(students.delete("EST001").unwrap_err().is_unknown());
        assert!(campus.courses().get("ING001").unwrap().has_student("EST001"));
        assert!(campus.check_enrollments().is_err());
    }

    #[test]
    fn statistics() {
        let mut campus = campus();
        let mut students = campus.student_manager();
        students.enroll("EST001", "ING001").unwrap();
        students.enroll("EST001", "ING002").unwrap();
        students.enroll("EST002", "ING002").unwrap();
        students.enroll("EST003", "ING003").unwrap();
        let stats = students.statistics();
        assert_eq!(stats.total_students, 5);
        assert_eq!(stats.enrollment_count, 4);
        assert_eq!(stats.by_variant.get("Teaching Assistant"), Some(&1));
        assert_eq!(stats.by_variant.get("Graduate/Professor"), Some(&1));
        assert_eq!(stats.by_variant.len(), 5);
    }

    #[test]
    fn search() {
        let mut campus = campus();
        let students = campus.student_manager();
        assert_eq!(students.search(&Criteria::new()).unwrap().len(), 5);
        assert!(students
            .search(&Criteria::new().with("name", "nobody"))
            .unwrap()
            .is_empty());

        let found = students
            .search(&Criteria::new().with("career", "computer"))
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["EST001", "EST003", "EST004"]);

        let found = students
            .search(&Criteria::new().with("term", 1u8).with("variant", "teaching"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "EST002");

        // staff have no term
        let found = students
            .search(&Criteria::new().with("term", 1u8))
            .unwrap();
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn doctoral_teaching_rights() {
        let mut campus = campus();
        let mut students = campus.student_manager();
        let ana = students.get_mut("EST004").unwrap();
        let mut teacher = ana.as_teacher().unwrap();
        assert_eq!(
            teacher.teach("ING002", "Linear algebra"),
            "Doctoral candidate Ana is not authorized to teach in ING002"
        );
        assert!(ana.add_teaching_course("ING002"));
        assert!(!ana.add_teaching_course("ING002"));
        let mut teacher = ana.as_teacher().unwrap();
        assert_eq!(
            teacher.teach("ING002", "Linear algebra"),
            "Doctoral candidate Ana taught a class on Linear algebra in ING002"
        );
        assert_eq!(
            teacher.teach("ING003", "Quantum mechanics"),
            "Doctoral candidate Ana is not authorized to teach in ING003"
        );
        assert_eq!(
            students.basic_info("EST004").unwrap().get("teaching_courses"),
            Some("ING002")
        );
    }

    #[test]
    fn supervision() {
        let mut campus = campus();
        let mut students = campus.student_manager();

        let carlos = students.get_mut("EST003").unwrap();
        let mut researcher = carlos.as_researcher().unwrap();
        for (student, topic) in [
            ("EST005", "Neural networks"),
            ("EST005", "Neural networks"),
            ("EST001", "Compilers"),
            ("", ""),
            ("EST999", ""),
            ("", "Quantum computing"),
        ] {
            assert_eq!(
                researcher.supervise_thesis(student, topic),
                "Graduate students are not authorized to supervise theses"
            );
        }
        assert!(carlos.directed_theses().is_empty());

        let ana = students.get_mut("EST004").unwrap();
        let mut researcher = ana.as_researcher().unwrap();
        assert_eq!(
            researcher.supervise_thesis("EST005", "Neural networks"),
            "Doctoral candidate Ana is supervising the thesis of EST005 on: Neural networks"
        );
        assert_eq!(ana.directed_theses(), &["EST005".to_string()]);

        let pedro = students.get_mut("PROF001").unwrap();
        let mut researcher = pedro.as_researcher().unwrap();
        assert_eq!(
            researcher.supervise_thesis("EST003", "Machine learning"),
            "PhD in Science Pedro is supervising the thesis of EST003 on: Machine learning"
        );
        assert_eq!(researcher.directed().len(), 1);
    }
}
