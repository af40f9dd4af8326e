//! Teacher listing and teacher detail.
use serde::{Deserialize, Serialize};

use crate::{
    constants::pagination::{DETAIL_LEADERBOARD_COUNT, LIST_LEADERBOARD_COUNT, TEACHERS_PER_PAGE},
    db::{
        self,
        models::{course::Course, favorite::FavoriteTarget, teacher::Teacher},
    },
    services::{favorites, sessions::Viewer},
    utils::{
        listing::{contains_ignore_case, non_empty, sort_desc_by, top_by},
        pagination::{self, Page, PageDisplay},
    },
};

/// Query parameters accepted by the teacher list.
#[derive(Deserialize, Default, Debug)]
pub struct TeacherListQuery {
    /// Free-text search over name, employer and title.
    pub keywords: Option<String>,
    /// `hot` orders by views; anything else keeps the default order.
    pub sort: Option<String>,
    /// Requested page number.
    pub page: Option<String>,
}

/// Keep the teachers matching `keywords` (if any), most viewed first when
/// `sort` is `hot`.
pub fn filter_teachers(
    teachers: Vec<Teacher>,
    keywords: Option<&str>,
    sort: Option<&str>,
) -> Vec<Teacher> {
    let keywords = non_empty(keywords).map(str::to_lowercase);
    let mut result: Vec<Teacher> = teachers
        .into_iter()
        .filter(|teacher| {
            keywords.as_deref().is_none_or(|keywords| {
                contains_ignore_case(&teacher.name, keywords)
                    || contains_ignore_case(&teacher.work_company, keywords)
                    || contains_ignore_case(&teacher.work_position, keywords)
            })
        })
        .collect();
    if sort == Some("hot") {
        sort_desc_by(&mut result, |teacher| teacher.click_nums);
    }
    result
}

/// The most viewed teachers.
pub fn leaderboard(teachers: &[Teacher], count: usize) -> Vec<Teacher> {
    top_by(teachers, count, |teacher| teacher.click_nums)
}

/// Everything the teacher list page shows.
#[derive(Serialize, Debug)]
pub struct TeacherListPage {
    /// The requested page of matching teachers.
    pub all_teachers: Page<Teacher>,
    /// How many teachers there are in total, before searching.
    pub teacher_nums: usize,
    /// The most viewed teachers, regardless of search.
    pub sorted_teachers: Vec<Teacher>,
    /// The sort key as given.
    pub sort: String,
}

/// Search, sort and paginate the teachers.
pub async fn list_teachers(
    query: TeacherListQuery,
    db_conn: &db::ConnectionPool,
) -> Result<TeacherListPage, errors::TeacherListError> {
    let all_teachers = Teacher::select_all(db_conn).await?;
    let teacher_nums = all_teachers.len();
    let sorted_teachers = leaderboard(&all_teachers, LIST_LEADERBOARD_COUNT);
    let matching = filter_teachers(
        all_teachers,
        query.keywords.as_deref(),
        query.sort.as_deref(),
    );
    let page = pagination::paginate(
        matching,
        TEACHERS_PER_PAGE,
        query.page.as_deref(),
        PageDisplay::configured(),
    )?;
    Ok(TeacherListPage {
        all_teachers: page,
        teacher_nums,
        sorted_teachers,
        sort: query.sort.unwrap_or_default(),
    })
}

/// Everything the teacher detail page shows.
#[derive(Serialize, Debug)]
pub struct TeacherDetailPage {
    pub teacher: Teacher,
    /// Every course the teacher gives.
    pub all_courses: Vec<Course>,
    /// The most viewed teachers.
    pub sorted_teachers: Vec<Teacher>,
    pub has_teacher_faved: bool,
    /// Whether the viewer has favorited the teacher's organization.
    pub has_org_faved: bool,
}

/// Load a teacher's detail page, counting the view.
pub async fn teacher_detail(
    teacher_id: i64,
    viewer: &Viewer,
    db_conn: &db::ConnectionPool,
) -> Result<TeacherDetailPage, errors::TeacherDetailError> {
    let teacher = Teacher::increment_clicks(teacher_id, db_conn)
        .await?
        .ok_or(errors::TeacherDetailError::NonExistent(teacher_id))?;
    let all_courses = Course::select_by_teacher(teacher_id, db_conn).await?;
    let has_teacher_faved =
        favorites::is_favorited(viewer, FavoriteTarget::teacher(teacher_id), db_conn).await?;
    let has_org_faved =
        favorites::is_favorited(viewer, FavoriteTarget::organization(teacher.org_id), db_conn)
            .await?;
    let sorted_teachers = Teacher::select_most_viewed(DETAIL_LEADERBOARD_COUNT, db_conn).await?;
    Ok(TeacherDetailPage {
        teacher,
        all_courses,
        sorted_teachers,
        has_teacher_faved,
        has_org_faved,
    })
}

pub mod errors {
    use crate::{db::errors::DatabaseError, utils::pagination::errors::EmptyPage};
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum TeacherListError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error(transparent)]
        EmptyPage(#[from] EmptyPage),
    }

    #[derive(Error, Debug)]
    pub enum TeacherDetailError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("Teacher {0} does not exist.")]
        NonExistent(i64),
    }
}
