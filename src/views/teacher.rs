//! Teacher course board
//!
//! Courses of the teacher with one of them selected. The selected course is
//! where new subjects and enrollments go, and its cohorts are shown next
//! to it. Enrollment only ever appends: a student already on the course is
//! rejected rather than duplicated.

use thiserror::Error;

use crate::api::{classes, courses, users};
use crate::client::{ApiClient, ApiError};
use crate::models::{ClassGroup, Course, NewCohort, NewCourse, NewSubject, Subject, User};

/// Errors from board actions
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("No course selected")]
    NoCourseSelected,

    #[error("Unknown course {0}")]
    UnknownCourse(String),

    #[error("Unknown student {0}")]
    UnknownStudent(String),

    #[error("{0} is already enrolled in this course")]
    AlreadyEnrolled(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseBoard {
    courses: Vec<Course>,
    students: Vec<User>,
    cohorts: Vec<ClassGroup>,
    selected: Option<String>,
}

impl CourseBoard {
    /// Board with the first course selected
    pub fn new(courses: Vec<Course>, students: Vec<User>) -> Self {
        let selected = courses.first().map(|c| c.id.clone());
        Self {
            courses,
            students,
            cohorts: Vec::new(),
            selected,
        }
    }

    /// Courses, students, and the cohorts of the first course
    pub async fn load(client: &ApiClient) -> Result<Self, BoardError> {
        let courses = courses::list(client).await?;
        let students = users::students(client).await?;
        let mut board = Self::new(courses, students);
        board.refresh_cohorts(client).await?;

        tracing::debug!(
            courses = board.courses.len(),
            students = board.students.len(),
            "Course board loaded"
        );
        Ok(board)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn students(&self) -> &[User] {
        &self.students
    }

    /// Cohorts of the selected course
    pub fn cohorts(&self) -> &[ClassGroup] {
        &self.cohorts
    }

    pub fn selected(&self) -> Option<&Course> {
        let id = self.selected.as_deref()?;
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn select(&mut self, course_id: &str) -> Result<(), BoardError> {
        if !self.courses.iter().any(|c| c.id == course_id) {
            return Err(BoardError::UnknownCourse(course_id.to_string()));
        }
        if self.selected.as_deref() != Some(course_id) {
            self.selected = Some(course_id.to_string());
            self.cohorts.clear();
        }
        Ok(())
    }

    /// Add a course and make it the selection
    pub fn add_course(&mut self, course: Course) {
        self.selected = Some(course.id.clone());
        self.cohorts.clear();
        self.courses.push(course);
    }

    pub fn add_subject(&mut self, subject: Subject) -> Result<(), BoardError> {
        self.selected_mut()?.subjects.push(subject);
        Ok(())
    }

    pub fn add_cohort(&mut self, cohort: ClassGroup) {
        self.cohorts.push(cohort);
    }

    /// Append a student to the selected course
    pub fn enroll(&mut self, student_id: &str) -> Result<(), BoardError> {
        let student = self
            .students
            .iter()
            .find(|s| s.id == student_id)
            .cloned()
            .ok_or_else(|| BoardError::UnknownStudent(student_id.to_string()))?;

        let course = self.selected_mut()?;
        if course.is_enrolled(student_id) {
            return Err(BoardError::AlreadyEnrolled(student.full_name()));
        }
        course.students.push(student);
        Ok(())
    }

    /// Every student paired with whether they follow the selected course
    pub fn enrollable(&self) -> Vec<(&User, bool)> {
        let course = self.selected();
        self.students
            .iter()
            .map(|s| (s, course.map_or(false, |c| c.is_enrolled(&s.id))))
            .collect()
    }

    fn selected_mut(&mut self) -> Result<&mut Course, BoardError> {
        let id = self.selected.as_deref().ok_or(BoardError::NoCourseSelected)?;
        self.courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(BoardError::NoCourseSelected)
    }

    fn selected_id(&self) -> Result<String, BoardError> {
        self.selected.clone().ok_or(BoardError::NoCourseSelected)
    }

    /// Reload cohorts for the selected course
    pub async fn refresh_cohorts(&mut self, client: &ApiClient) -> Result<(), BoardError> {
        self.cohorts = match self.selected.as_deref() {
            Some(id) => classes::list(client, Some(id)).await?,
            None => Vec::new(),
        };
        Ok(())
    }

    pub async fn create_course(
        &mut self,
        client: &ApiClient,
        course: &NewCourse,
    ) -> Result<(), BoardError> {
        let created = courses::create(client, course).await?;
        self.add_course(created);
        Ok(())
    }

    pub async fn create_subject(
        &mut self,
        client: &ApiClient,
        subject: &NewSubject,
    ) -> Result<(), BoardError> {
        let course_id = self.selected_id()?;
        let created = courses::add_subject(client, &course_id, subject).await?;
        self.add_subject(created)
    }

    /// Create a cohort for the selected course
    pub async fn create_cohort(
        &mut self,
        client: &ApiClient,
        name: &str,
        program: &str,
    ) -> Result<(), BoardError> {
        let cohort = NewCohort {
            name: name.to_string(),
            program: program.to_string(),
            course_id: self.selected_id()?,
        };
        let created = classes::create(client, &cohort).await?;
        self.add_cohort(created);
        Ok(())
    }

    /// Enroll on the backend; rejected locally when already enrolled
    pub async fn enroll_student(
        &mut self,
        client: &ApiClient,
        student_id: &str,
    ) -> Result<(), BoardError> {
        let course_id = self.selected_id()?;
        let already = self.selected().map_or(false, |c| c.is_enrolled(student_id));
        if already {
            let name = self
                .students
                .iter()
                .find(|s| s.id == student_id)
                .map(User::full_name)
                .unwrap_or_else(|| student_id.to_string());
            return Err(BoardError::AlreadyEnrolled(name));
        }
        if !self.students.iter().any(|s| s.id == student_id) {
            return Err(BoardError::UnknownStudent(student_id.to_string()));
        }

        courses::enroll(client, &course_id, student_id).await?;
        self.enroll(student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, first: &str) -> User {
        User {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Janssens".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            is_teacher: false,
            class_group_id: None,
            phone: None,
        }
    }

    fn course(id: &str, name: &str) -> Course {
        Course {
            id: id.to_string(),
            name: name.to_string(),
            subjects: Vec::new(),
            students: Vec::new(),
        }
    }

    fn board() -> CourseBoard {
        CourseBoard::new(
            vec![course("c1", "Web"), course("c2", "Data")],
            vec![student("s1", "Lotte"), student("s2", "Noah")],
        )
    }

    #[test]
    fn test_first_course_selected() {
        assert_eq!(board().selected().map(|c| c.id.as_str()), Some("c1"));
        assert!(CourseBoard::new(Vec::new(), Vec::new()).selected().is_none());
    }

    #[test]
    fn test_select() {
        let mut board = board();
        board.select("c2").unwrap();
        assert_eq!(board.selected().unwrap().name, "Data");
        assert!(matches!(board.select("nope"), Err(BoardError::UnknownCourse(_))));
    }

    #[test]
    fn test_add_course_selects_it() {
        let mut board = board();
        board.add_course(course("c3", "Mobile"));
        assert_eq!(board.selected().unwrap().id, "c3");
        assert_eq!(board.courses().len(), 3);
    }

    #[test]
    fn test_add_subject_to_selection() {
        let mut board = board();
        board
            .add_subject(Subject {
                id: "sub1".to_string(),
                name: "HTML".to_string(),
            })
            .unwrap();
        assert_eq!(board.selected().unwrap().subjects.len(), 1);

        let mut empty = CourseBoard::default();
        let result = empty.add_subject(Subject {
            id: "sub2".to_string(),
            name: "CSS".to_string(),
        });
        assert!(matches!(result, Err(BoardError::NoCourseSelected)));
    }

    #[test]
    fn test_enroll_appends_once() {
        let mut board = board();
        board.enroll("s1").unwrap();

        let err = board.enroll("s1").unwrap_err();
        assert_eq!(err.to_string(), "Lotte Janssens is already enrolled in this course");
        assert_eq!(board.selected().unwrap().students.len(), 1);
        assert!(matches!(board.enroll("ghost"), Err(BoardError::UnknownStudent(_))));
    }

    #[test]
    fn test_enrollable_flags() {
        let mut board = board();
        board.enroll("s2").unwrap();

        let flags: Vec<(&str, bool)> = board
            .enrollable()
            .into_iter()
            .map(|(s, enrolled)| (s.id.as_str(), enrolled))
            .collect();
        assert_eq!(flags, vec![("s1", false), ("s2", true)]);

        board.select("c2").unwrap();
        assert!(board.enrollable().iter().all(|(_, enrolled)| !enrolled));
    }
}
