//! Organization listing and the organization detail tabs.
use serde::{Deserialize, Serialize};

use crate::{
    constants::pagination::{HOME_COURSES_COUNT, HOME_TEACHERS_COUNT, HOT_ORGS_COUNT, ORGS_PER_PAGE},
    db::{
        self,
        models::{
            city::City, course::Course, favorite::FavoriteTarget, organization::Organization,
            teacher::Teacher,
        },
    },
    services::{favorites, sessions::Viewer},
    utils::{
        listing::{contains_ignore_case, non_empty, sort_desc_by, top_by},
        pagination::{self, Page, PageDisplay},
    },
};

/// Query parameters accepted by the organization list.
#[derive(Deserialize, Default, Debug)]
pub struct OrgListQuery {
    /// Free-text search over name and description.
    pub keywords: Option<String>,
    /// City ID to restrict to.
    pub city: Option<String>,
    /// Category code to restrict to.
    pub ct: Option<String>,
    /// `students` or `courses`; anything else keeps the default order.
    pub sort: Option<String>,
    /// Requested page number.
    pub page: Option<String>,
}

/// Ordering applied after filtering.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OrgSort {
    /// Insertion order.
    #[default]
    Default,
    /// Most students first.
    Students,
    /// Most courses first.
    Courses,
}

impl From<&str> for OrgSort {
    fn from(value: &str) -> Self {
        match value {
            "students" => Self::Students,
            "courses" => Self::Courses,
            _ => Self::Default,
        }
    }
}

/// Validated filters for the organization list.
#[derive(Debug, Default)]
pub struct OrgFilter {
    /// Lowercased search keyword.
    keywords: Option<String>,
    city_id: Option<i64>,
    category: Option<String>,
    sort: OrgSort,
}

impl OrgFilter {
    /// Validate the raw query. Empty parameters are ignored.
    pub fn parse(query: &OrgListQuery) -> Result<Self, errors::OrgListError> {
        let city_id = non_empty(query.city.as_deref())
            .map(|city| {
                city.trim()
                    .parse()
                    .map_err(|_err| errors::OrgListError::InvalidCity(city.to_owned()))
            })
            .transpose()?;
        Ok(Self {
            keywords: non_empty(query.keywords.as_deref()).map(str::to_lowercase),
            city_id,
            category: non_empty(query.ct.as_deref()).map(str::to_owned),
            sort: non_empty(query.sort.as_deref()).map_or_else(OrgSort::default, OrgSort::from),
        })
    }
}

/// Apply keyword, city and category filters in that order, then sort.
pub fn filter_organizations(orgs: Vec<Organization>, filter: &OrgFilter) -> Vec<Organization> {
    let mut result: Vec<Organization> = orgs
        .into_iter()
        .filter(|org| {
            filter.keywords.as_deref().is_none_or(|keywords| {
                contains_ignore_case(&org.name, keywords)
                    || contains_ignore_case(&org.description, keywords)
            })
        })
        .filter(|org| filter.city_id.is_none_or(|city_id| org.city_id == city_id))
        .filter(|org| {
            filter
                .category
                .as_deref()
                .is_none_or(|category| org.category == category)
        })
        .collect();
    match filter.sort {
        OrgSort::Students => sort_desc_by(&mut result, |org| org.students),
        OrgSort::Courses => sort_desc_by(&mut result, |org| org.course_nums),
        OrgSort::Default => {}
    }
    result
}

/// The most viewed organizations.
pub fn hot_organizations(orgs: &[Organization]) -> Vec<Organization> {
    top_by(orgs, HOT_ORGS_COUNT, |org| org.click_nums)
}

/// Everything the organization list page shows.
#[derive(Serialize, Debug)]
pub struct OrgListPage {
    /// The requested page of matching organizations.
    pub all_orgs: Page<Organization>,
    /// Every city, for the city filter.
    pub all_cities: Vec<City>,
    /// How many organizations matched.
    pub org_nums: usize,
    /// The city filter as given.
    pub city_id: String,
    /// The category filter as given.
    pub category: String,
    /// The most viewed organizations, regardless of filters.
    pub hot_orgs: Vec<Organization>,
    /// The sort key as given.
    pub sort: String,
}

/// Search, filter, sort and paginate the organizations.
pub async fn list_organizations(
    query: OrgListQuery,
    db_conn: &db::ConnectionPool,
) -> Result<OrgListPage, errors::OrgListError> {
    let filter = OrgFilter::parse(&query)?;
    let all_orgs = Organization::select_all(db_conn).await?;
    let hot_orgs = hot_organizations(&all_orgs);
    let all_cities = City::select_all(db_conn).await?;
    let matching = filter_organizations(all_orgs, &filter);
    let org_nums = matching.len();
    let page = pagination::paginate(
        matching,
        ORGS_PER_PAGE,
        query.page.as_deref(),
        PageDisplay::configured(),
    )?;
    Ok(OrgListPage {
        all_orgs: page,
        all_cities,
        org_nums,
        city_id: query.city.unwrap_or_default(),
        category: query.ct.unwrap_or_default(),
        hot_orgs,
        sort: query.sort.unwrap_or_default(),
    })
}

/// The tabs of an organization's detail pages.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum OrgTab {
    /// Overview with a preview of courses and teachers. Counts as a view.
    Home,
    /// Every course the organization offers.
    Course,
    /// The organization's description.
    Desc,
    /// Every teacher working for the organization.
    Teacher,
}

/// Everything an organization detail tab shows.
#[derive(Serialize, Debug)]
pub struct OrgDetailPage {
    pub course_org: Organization,
    pub current_page: OrgTab,
    /// Whether the viewer has favorited this organization.
    pub has_fav: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_courses: Option<Vec<Course>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_teachers: Option<Vec<Teacher>>,
}

/// Load one tab of an organization's detail pages.
pub async fn organization_detail(
    org_id: i64,
    tab: OrgTab,
    viewer: &Viewer,
    db_conn: &db::ConnectionPool,
) -> Result<OrgDetailPage, errors::OrgDetailError> {
    let course_org = match tab {
        OrgTab::Home => Organization::increment_clicks(org_id, db_conn).await?,
        OrgTab::Course | OrgTab::Desc | OrgTab::Teacher => {
            Organization::select_one(org_id, db_conn).await?
        }
    }
    .ok_or(errors::OrgDetailError::NonExistent(org_id))?;
    let has_fav =
        favorites::is_favorited(viewer, FavoriteTarget::organization(org_id), db_conn).await?;
    let all_courses = match tab {
        OrgTab::Home => Some(Course::select_by_org(org_id, Some(HOME_COURSES_COUNT), db_conn).await?),
        OrgTab::Course => Some(Course::select_by_org(org_id, None, db_conn).await?),
        OrgTab::Desc | OrgTab::Teacher => None,
    };
    let all_teachers = match tab {
        OrgTab::Home => {
            Some(Teacher::select_by_org(org_id, Some(HOME_TEACHERS_COUNT), db_conn).await?)
        }
        OrgTab::Teacher => Some(Teacher::select_by_org(org_id, None, db_conn).await?),
        OrgTab::Course | OrgTab::Desc => None,
    };
    Ok(OrgDetailPage {
        course_org,
        current_page: tab,
        has_fav,
        all_courses,
        all_teachers,
    })
}

pub mod errors {
    use crate::{db::errors::DatabaseError, utils::pagination::errors::EmptyPage};
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum OrgListError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("City filter {0:?} is not a city ID.")]
        InvalidCity(String),
        #[error(transparent)]
        EmptyPage(#[from] EmptyPage),
    }

    #[derive(Error, Debug)]
    pub enum OrgDetailError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("Organization {0} does not exist.")]
        NonExistent(i64),
    }
}
