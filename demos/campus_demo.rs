//! Builds a small campus, enrolls people and exercises their capabilities.
//!
//! Run with `RUST_LOG=debug` to see the repositories at work.

campus_rs::prelude! {}

fn populate(campus: &mut Campus) -> Res<()> {
    println!("creating courses...");
    let mut courses = campus.course_manager();
    courses.create_course("ING001", "Programming I", 6, 1, "PROF001")?;
    courses.create_course("ING002", "Mathematics I", 8, 1, "PROF002")?;
    courses.create_course("ING003", "Physics I", 6, 2, "PROF003")?;

    println!("creating people...");
    let mut students = campus.student_manager();
    students.create_undergrad(
        Identity::new("EST001", "Juan", "Pérez", "juan.perez@uv.cl"),
        "Computer Engineering",
    )?;
    students.create_assistant(
        Identity::new("EST002", "María", "González", "maria.gonzalez@uv.cl"),
        "Civil Engineering",
        &["ING001"],
    )?;
    students.create_graduate(
        Identity::new("EST003", "Carlos", "Rodríguez", "carlos.rodriguez@uv.cl"),
        "MSc in Computer Science",
        "Machine learning in education",
    )?;
    students.create_doctoral(
        Identity::new("EST004", "Ana", "López", "ana.lopez@uv.cl"),
        "PhD in Computer Science",
        "AI in educational systems",
        "Artificial intelligence",
    )?;
    students.create_staff(
        Identity::new("PROF001", "Pedro", "Martínez", "pedro.martinez@uv.cl"),
        "PhD in Science",
        "Programming",
    )?;

    println!("enrolling...");
    for (student, course) in [
        ("EST001", "ING001"),
        ("EST001", "ING002"),
        ("EST002", "ING002"),
        ("EST003", "ING003"),
    ] {
        students.enroll(student, course)?;
    }
    Ok(())
}

fn capabilities(campus: &mut Campus) -> Res<()> {
    let mut students = campus.student_manager();
    macro_rules! fetch {
        ($id:expr) => {
            students
                .get_mut($id)
                .ok_or_else(|| error!(@unknown("student") $id))?
        };
    }

    println!("\n|===| studying");
    for id in ["EST001", "EST002"] {
        if let Some(studier) = fetch!(id).as_studier() {
            println!("| {}", studier.study("Programming"));
        }
    }

    println!("|===| teaching");
    if let Some(mut teacher) = fetch!("EST002").as_teacher() {
        println!("| {}", teacher.teach("ING001", "Variables and data types"));
    }
    if let Some(mut teacher) = fetch!("EST004").as_teacher() {
        println!("| {}", teacher.teach("ING003", "Quantum mechanics"));
    }
    let pedro = fetch!("PROF001");
    pedro.add_teaching_course("ING001");
    if let Some(mut teacher) = pedro.as_teacher() {
        println!("| {}", teacher.teach("ING001", "Introduction to programming"));
    }

    println!("|===| researching");
    if let Some(mut researcher) = fetch!("EST003").as_researcher() {
        println!("| {}", researcher.research("Machine learning algorithms"));
        researcher.publish(
            "ML in education",
            "Machine learning applied to educational systems",
        );
    }
    if let Some(mut researcher) = fetch!("EST004").as_researcher() {
        println!(
            "| {}",
            researcher.supervise_thesis("EST005", "Neural networks in education")
        );
    }
    if let Some(mut researcher) = fetch!("PROF001").as_researcher() {
        researcher.publish(
            "New programming paradigms",
            "Trends in programming languages",
        );
    }
    println!("|===|");
    Ok(())
}

fn statistics(campus: &mut Campus) {
    let students = campus.student_manager();
    println!("\n|===| people");
    for student in students.list() {
        let info = student.basic_info();
        println!("| {} {} ({})", info.name, info.surname, info.label);
    }
    println!("|===| population");
    for line in students.statistics().to_string().lines() {
        println!("| {}", line);
    }

    let courses = campus.course_manager();
    println!("|===| courses");
    for line in courses.overall_statistics().to_string().lines() {
        println!("| {}", line);
    }
    println!("|===| load");
    for line in courses.course_load("PROF001").to_string().lines() {
        println!("| {}", line);
    }
    println!("|===|");
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .env()
        .without_timestamps()
        .init()?;

    let mut campus = Campus::with_capacity(5, 3);
    populate(&mut campus)?;
    capabilities(&mut campus)?;
    statistics(&mut campus);

    campus.check_enrollments()?;
    println!("\nfinal campus is");
    for line in campus.to_pretty_string().lines() {
        println!("| {}", line);
    }
    Ok(())
}
