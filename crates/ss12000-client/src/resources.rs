//! Named per-resource methods on [`Ss12000Client`].
//!
//! These are thin wrappers over the generic operations; the descriptor table
//! in [`endpoints`](crate::endpoints) decides what each one accepts.

use crate::client::{ResponseBody, Ss12000Client};
use crate::endpoints::Resource;
use crate::error::Ss12000Error;
use crate::filters::{ExpandOptions, Filters, LookupRequest};

macro_rules! entity_methods {
    ($($resource:ident => $list:ident, $lookup:ident, $by_id:ident;)+) => {
        impl Ss12000Client {
            $(
                #[doc = concat!("Lists [`Resource::", stringify!($resource), "`].")]
                ///
                /// # Errors
                ///
                /// See [`Ss12000Client::list`].
                pub async fn $list(&self, filters: &Filters) -> Result<ResponseBody, Ss12000Error> {
                    self.list(Resource::$resource, filters).await
                }

                #[doc = concat!("Bulk lookup of [`Resource::", stringify!($resource), "`].")]
                ///
                /// # Errors
                ///
                /// See [`Ss12000Client::lookup`].
                pub async fn $lookup(
                    &self,
                    request: &LookupRequest,
                ) -> Result<ResponseBody, Ss12000Error> {
                    self.lookup(Resource::$resource, request).await
                }

                #[doc = concat!("Fetches one of [`Resource::", stringify!($resource), "`] by id.")]
                ///
                /// # Errors
                ///
                /// See [`Ss12000Client::get_by_id`].
                pub async fn $by_id(
                    &self,
                    id: &str,
                    options: &ExpandOptions,
                ) -> Result<ResponseBody, Ss12000Error> {
                    self.get_by_id(Resource::$resource, id, options).await
                }
            )+
        }
    };
}

entity_methods! {
    Organisations => get_organisations, lookup_organisations, get_organisation_by_id;
    Persons => get_persons, lookup_persons, get_person_by_id;
    Placements => get_placements, lookup_placements, get_placement_by_id;
    Duties => get_duties, lookup_duties, get_duty_by_id;
    Groups => get_groups, lookup_groups, get_group_by_id;
    Programmes => get_programmes, lookup_programmes, get_programme_by_id;
    StudyPlans => get_study_plans, lookup_study_plans, get_study_plan_by_id;
    Syllabuses => get_syllabuses, lookup_syllabuses, get_syllabus_by_id;
    SchoolUnitOfferings => get_school_unit_offerings, lookup_school_unit_offerings, get_school_unit_offering_by_id;
    Activities => get_activities, lookup_activities, get_activity_by_id;
    CalendarEvents => get_calendar_events, lookup_calendar_events, get_calendar_event_by_id;
    Attendances => get_attendances, lookup_attendances, get_attendance_by_id;
    AttendanceEvents => get_attendance_events, lookup_attendance_events, get_attendance_event_by_id;
    AttendanceSchedules => get_attendance_schedules, lookup_attendance_schedules, get_attendance_schedule_by_id;
    Grades => get_grades, lookup_grades, get_grade_by_id;
    AggregatedAttendances => get_aggregated_attendances, lookup_aggregated_attendances, get_aggregated_attendance_by_id;
    Resources => get_resources, lookup_resources, get_resource_by_id;
    Rooms => get_rooms, lookup_rooms, get_room_by_id;
}

impl Ss12000Client {
    /// Lists webhook subscriptions. Accepts `limit` and `page_token` only.
    ///
    /// # Errors
    ///
    /// See [`Ss12000Client::list`].
    pub async fn get_subscriptions(&self, filters: &Filters) -> Result<ResponseBody, Ss12000Error> {
        self.list(Resource::Subscriptions, filters).await
    }

    /// # Errors
    ///
    /// See [`Ss12000Client::get_by_id`].
    pub async fn get_subscription_by_id(&self, id: &str) -> Result<ResponseBody, Ss12000Error> {
        self.get_by_id(Resource::Subscriptions, id, &ExpandOptions::new())
            .await
    }

    /// # Errors
    ///
    /// See [`Ss12000Client::delete`].
    pub async fn delete_subscription(&self, id: &str) -> Result<ResponseBody, Ss12000Error> {
        self.delete(Resource::Subscriptions, id).await
    }

    /// # Errors
    ///
    /// See [`Ss12000Client::delete`].
    pub async fn delete_attendance(&self, id: &str) -> Result<ResponseBody, Ss12000Error> {
        self.delete(Resource::Attendances, id).await
    }

    /// Reads the server's request log.
    ///
    /// # Errors
    ///
    /// See [`Ss12000Client::list`].
    pub async fn get_log(&self, filters: &Filters) -> Result<ResponseBody, Ss12000Error> {
        self.list(Resource::Log, filters).await
    }

    /// # Errors
    ///
    /// See [`Ss12000Client::list`].
    pub async fn get_statistics(&self, filters: &Filters) -> Result<ResponseBody, Ss12000Error> {
        self.list(Resource::Statistics, filters).await
    }
}
