pub mod administrators;

pub mod professors;

pub mod students;

pub use administrators::configure_administrator_routes;
pub use professors::configure_professor_routes;
pub use students::configure_student_routes;
