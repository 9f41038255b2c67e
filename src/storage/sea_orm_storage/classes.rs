//! 开课存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::errors::{LmsError, Result};
use crate::models::{
    ClassKey,
    classes::{entities::Class, requests::NewClass},
};
use chrono::Timelike;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建开课
    ///
    /// 同一课程同一学期只能开一次；同一地点同一学期的上课时间不能重叠。
    pub async fn create_class_impl(&self, req: NewClass) -> Result<Class> {
        if req.start_time >= req.end_time {
            return Err(LmsError::validation("Class start time must be before end time"));
        }

        let start = req.start_time.num_seconds_from_midnight() as i32;
        let end = req.end_time.num_seconds_from_midnight() as i32;

        let txn = self.begin_write().await?;

        let course = Courses::find()
            .filter(CourseColumn::Subject.eq(req.subject.as_str()))
            .filter(CourseColumn::Number.eq(req.number))
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| {
                LmsError::not_found(format!("Course {} {} not found", req.subject, req.number))
            })?;

        let offered = Classes::find()
            .filter(Column::CourseId.eq(course.id))
            .filter(Column::Season.eq(req.season.as_str()))
            .filter(Column::Year.eq(req.year))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询开课失败: {e}")))?;

        if offered > 0 {
            return Err(LmsError::conflict(format!(
                "Course {} {} is already offered in {} {}",
                req.subject, req.number, req.season, req.year
            )));
        }

        // 半开区间 [start, end) 相交
        let overlapping = Classes::find()
            .filter(Column::Location.eq(req.location.as_str()))
            .filter(Column::Season.eq(req.season.as_str()))
            .filter(Column::Year.eq(req.year))
            .filter(Column::StartTime.lt(end))
            .filter(Column::EndTime.gt(start))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询开课失败: {e}")))?;

        if overlapping > 0 {
            return Err(LmsError::conflict(format!(
                "Location {} is already in use during that time in {} {}",
                req.location, req.season, req.year
            )));
        }

        let model = ActiveModel {
            course_id: Set(course.id),
            season: Set(req.season),
            year: Set(req.year),
            location: Set(req.location),
            start_time: Set(start),
            end_time: Set(end),
            instructor_uid: Set(req.instructor_uid),
            ..Default::default()
        };

        let result = model.insert(&txn).await.map_err(db_error("创建开课失败"))?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 (院系, 课程编号, 季节, 年份) 查找开课ID
    pub async fn find_class_id_impl(&self, key: &ClassKey) -> Result<Option<i64>> {
        let result = Classes::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::classes::Relation::Course.def(),
            )
            .filter(CourseColumn::Subject.eq(key.subject.as_str()))
            .filter(CourseColumn::Number.eq(key.num))
            .filter(Column::Season.eq(key.season.as_str()))
            .filter(Column::Year.eq(key.year))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询开课失败: {e}")))?;

        Ok(result.map(|m| m.id))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::ClassKey;
    use crate::models::classes::requests::NewClass;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::departments::requests::CreateDepartmentRequest;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use chrono::NaiveTime;

    fn new_class(season: &str, location: &str, start: (u32, u32), end: (u32, u32)) -> NewClass {
        NewClass {
            subject: "CS".to_string(),
            number: 5530,
            season: season.to_string(),
            year: 2024,
            location: location.to_string(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            instructor_uid: "u0000100".to_string(),
        }
    }

    async fn seed_catalog(storage: &super::SeaOrmStorage) {
        storage
            .create_department_impl(CreateDepartmentRequest {
                subject: "CS".to_string(),
                name: "Computer Science".to_string(),
            })
            .await
            .unwrap();
        for number in [5530, 3500] {
            storage
                .create_course_impl(CreateCourseRequest {
                    subject: "CS".to_string(),
                    number,
                    name: format!("Course {number}"),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_and_find_class() {
        let storage = memory_storage().await;
        seed_catalog(&storage).await;

        let class = storage
            .create_class_impl(new_class("Fall", "WEB L104", (9, 0), (10, 20)))
            .await
            .unwrap();
        assert_eq!(class.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());

        let key = ClassKey {
            subject: "CS".to_string(),
            num: 5530,
            season: "Fall".to_string(),
            year: 2024,
        };
        assert_eq!(storage.find_class_id_impl(&key).await.unwrap(), Some(class.id));

        let missing = ClassKey {
            season: "Spring".to_string(),
            ..key
        };
        assert_eq!(storage.find_class_id_impl(&missing).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_same_course_twice_in_semester_conflicts() {
        let storage = memory_storage().await;
        seed_catalog(&storage).await;

        storage
            .create_class_impl(new_class("Fall", "WEB L104", (9, 0), (10, 20)))
            .await
            .unwrap();
        let err = storage
            .create_class_impl(new_class("Fall", "WEB L105", (13, 0), (14, 20)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_location_overlap_conflicts() {
        let storage = memory_storage().await;
        seed_catalog(&storage).await;

        storage
            .create_class_impl(new_class("Fall", "WEB L104", (9, 0), (10, 20)))
            .await
            .unwrap();

        let mut overlapping = new_class("Fall", "WEB L104", (10, 0), (11, 0));
        overlapping.number = 3500;
        let err = storage.create_class_impl(overlapping).await.unwrap_err();
        assert_eq!(err.code(), "E006");

        // 首尾相接不算冲突
        let mut adjacent = new_class("Fall", "WEB L104", (10, 20), (11, 40));
        adjacent.number = 3500;
        assert!(storage.create_class_impl(adjacent).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_course_and_bad_times() {
        let storage = memory_storage().await;
        seed_catalog(&storage).await;

        let mut unknown = new_class("Fall", "WEB L104", (9, 0), (10, 0));
        unknown.number = 1;
        assert_eq!(
            storage.create_class_impl(unknown).await.unwrap_err().code(),
            "E005"
        );

        let reversed = new_class("Fall", "WEB L104", (10, 0), (9, 0));
        assert_eq!(
            storage.create_class_impl(reversed).await.unwrap_err().code(),
            "E004"
        );
    }
}
