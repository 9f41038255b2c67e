use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{debug, info};

use super::ProfessorService;
use crate::errors::{LmsError, Result};
use crate::models::SuccessResponse;
use crate::models::grading::{entities::StudentGrade, requests::RecomputeGradesRequest};
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::services::{failure_response, lookup};
use crate::storage::Storage;
use crate::utils::validate::{validate_class_key, validate_name, validate_uid};

pub async fn grade_submission(
    service: &ProfessorService,
    request: &HttpRequest,
    grade: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let uid = grade.uid.clone();

    match score_and_regrade(&storage, grade).await {
        Ok(Some(student_grade)) => {
            info!(
                "Submission of {} graded, letter grade now {}",
                uid, student_grade.letter_grade
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Ok(None) => {
            debug!("Submission of {} graded, student is not enrolled", uid);
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Submission grading", &e)),
    }
}

/// 评分只影响该学生，得分与这一条选课记录的成绩一同写入
async fn score_and_regrade(
    storage: &Arc<dyn Storage>,
    grade: GradeSubmissionRequest,
) -> Result<Option<StudentGrade>> {
    validate_class_key(&grade.class)
        .and(validate_name(&grade.category))
        .and(validate_name(&grade.asgname))
        .and(validate_uid(&grade.uid))
        .map_err(LmsError::validation)?;

    let assignment_id =
        lookup::resolve_assignment(storage, &grade.class, &grade.category, &grade.asgname).await?;

    let (_, student_grade) = storage
        .grade_submission(assignment_id, &grade.uid, grade.score)
        .await?
        .ok_or_else(|| {
            LmsError::not_found(format!(
                "No submission of {} by {}",
                grade.asgname, grade.uid
            ))
        })?;

    Ok(student_grade)
}

pub async fn recompute_grades(
    service: &ProfessorService,
    request: &HttpRequest,
    recompute: RecomputeGradesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match recompute_class(&storage, &recompute).await {
        Ok(grades) => {
            info!(
                "Recomputed {} letter grade(s) in class {}",
                grades.len(),
                recompute.class
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Grade recomputation", &e)),
    }
}

async fn recompute_class(
    storage: &Arc<dyn Storage>,
    recompute: &RecomputeGradesRequest,
) -> Result<Vec<StudentGrade>> {
    validate_class_key(&recompute.class).map_err(LmsError::validation)?;
    let class_id = lookup::resolve_class(storage, &recompute.class).await?;
    storage.recompute_class_grades(class_id).await
}
