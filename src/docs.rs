use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{Identity, LoginRequest, LoginResponse, Realm, User};
use crate::modules::courses::model::{
    AssignInstructorsDto, Course, CourseWithInstructors, CourseWithStudents, CreateCourseDto,
    UpdateCourseDto,
};
use crate::modules::instructors::model::{
    AssignCoursesDto, CreateInstructorDto, Instructor, InstructorWithCourses,
    InstructorWithStudents, UpdateInstructorDto,
};
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentWithCourses, UpdateStudentDto,
};
use crate::utils::pagination::{Pagination, PaginationParams};
use crate::utils::relations::IdRef;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::current,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::restore_course,
        crate::modules::courses::controller::trashed_courses,
        crate::modules::courses::controller::force_delete_course,
        crate::modules::courses::controller::course_instructors,
        crate::modules::courses::controller::course_students,
        crate::modules::courses::controller::assign_course_instructor,
        crate::modules::courses::controller::unassign_course_instructor,
        crate::modules::instructors::controller::list_instructors,
        crate::modules::instructors::controller::create_instructor,
        crate::modules::instructors::controller::get_instructor,
        crate::modules::instructors::controller::update_instructor,
        crate::modules::instructors::controller::delete_instructor,
        crate::modules::instructors::controller::restore_instructor,
        crate::modules::instructors::controller::trashed_instructors,
        crate::modules::instructors::controller::force_delete_instructor,
        crate::modules::instructors::controller::instructor_courses,
        crate::modules::instructors::controller::instructor_students,
        crate::modules::instructors::controller::assign_instructor_course,
        crate::modules::instructors::controller::unassign_instructor_course,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::restore_student,
        crate::modules::students::controller::trashed_students,
        crate::modules::students::controller::force_delete_student,
        crate::modules::students::controller::student_courses,
        crate::modules::students::controller::assign_student_course,
        crate::modules::students::controller::unassign_student_course,
    ),
    components(
        schemas(
            Realm,
            User,
            Identity,
            LoginRequest,
            LoginResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            AssignInstructorsDto,
            CourseWithInstructors,
            CourseWithStudents,
            Instructor,
            CreateInstructorDto,
            UpdateInstructorDto,
            AssignCoursesDto,
            InstructorWithCourses,
            InstructorWithStudents,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            StudentWithCourses,
            IdRef,
            Pagination,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Dual-realm login, refresh, logout and current identity"),
        (name = "Courses", description = "Course management with soft-delete lifecycle"),
        (name = "Instructors", description = "Instructor management and course assignment"),
        (name = "Students", description = "Student management and course enrollment"),
    ),
    info(
        title = "Lectern API",
        description = "Course management REST API with admin and student authentication realms",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
