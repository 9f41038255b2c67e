use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建院系表
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Subject)
                            .string_len(4)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Subject).string_len(4).not_null())
                    .col(ColumnDef::new(Courses::Number).integer().not_null())
                    .col(ColumnDef::new(Courses::Name).string_len(100).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::Subject)
                            .to(Departments::Table, Departments::Subject)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建开课表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::Season).string_len(6).not_null())
                    .col(ColumnDef::new(Classes::Year).integer().not_null())
                    .col(ColumnDef::new(Classes::Location).string_len(100).not_null())
                    .col(ColumnDef::new(Classes::StartTime).integer().not_null())
                    .col(ColumnDef::new(Classes::EndTime).integer().not_null())
                    .col(
                        ColumnDef::new(Classes::InstructorUid)
                            .string_len(8)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业分类表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentCategories::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentCategories::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentCategories::Weight)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentCategories::Table, AssignmentCategories::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Assignments::MaxPoints).integer().not_null())
                    .col(ColumnDef::new(Assignments::Contents).text().not_null())
                    .col(ColumnDef::new(Assignments::DueAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CategoryId)
                            .to(AssignmentCategories::Table, AssignmentCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表（作业 + 学生 复合主键）
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::StudentUid)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Score).integer().null())
                    .col(ColumnDef::new(Submissions::Contents).text().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Submissions::AssignmentId)
                            .col(Submissions::StudentUid),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::ClassId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Enrollments::StudentUid)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::LetterGrade)
                            .string_len(2)
                            .not_null()
                            .default("--"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_subject_number")
                    .table(Courses::Table)
                    .col(Courses::Subject)
                    .col(Courses::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_course_semester")
                    .table(Classes::Table)
                    .col(Classes::CourseId)
                    .col(Classes::Season)
                    .col(Classes::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_categories_class_name")
                    .table(AssignmentCategories::Table)
                    .col(AssignmentCategories::ClassId)
                    .col(AssignmentCategories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_category_name")
                    .table(Assignments::Table)
                    .col(Assignments::CategoryId)
                    .col(Assignments::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_class_student")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassId)
                    .col(Enrollments::StudentUid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_location")
                    .table(Classes::Table)
                    .col(Classes::Location)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_student_uid")
                    .table(Submissions::Table)
                    .col(Submissions::StudentUid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_student_uid")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentUid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Departments {
    #[sea_orm(iden = "departments")]
    Table,
    Subject,
    Name,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Subject,
    Number,
    Name,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    CourseId,
    Season,
    Year,
    Location,
    StartTime,
    EndTime,
    InstructorUid,
}

#[derive(DeriveIden)]
enum AssignmentCategories {
    #[sea_orm(iden = "assignment_categories")]
    Table,
    Id,
    ClassId,
    Name,
    Weight,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    CategoryId,
    Name,
    MaxPoints,
    Contents,
    DueAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    AssignmentId,
    StudentUid,
    Score,
    Contents,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    ClassId,
    StudentUid,
    LetterGrade,
}
