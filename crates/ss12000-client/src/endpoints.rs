//! Static endpoint table for every SS12000 resource.
//!
//! Each [`Resource`] has exactly one [`EndpointDescriptor`] describing its
//! path, the filters its list endpoint accepts, and which of the lookup,
//! expand, by-id, and delete variants exist. The table is built at compile
//! time and only ever read.

use std::fmt;
use std::str::FromStr;

/// How a logical filter expands into wire query keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// One logical name, one wire key, one value.
    Scalar,
    /// One logical name, one wire key repeated once per value.
    List,
    /// `x_on_or_before` / `x_on_or_after` -> `X.onOrBefore` / `X.onOrAfter`.
    Range,
    /// `x_before` / `x_after` -> `X.before` / `X.after`.
    Timestamp,
}

/// A filter entry in a resource's table, before shape expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub name: &'static str,
    pub wire: &'static str,
    pub shape: FieldShape,
}

impl FilterField {
    const fn scalar(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            shape: FieldShape::Scalar,
        }
    }

    const fn list(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            shape: FieldShape::List,
        }
    }

    const fn range(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            shape: FieldShape::Range,
        }
    }

    const fn timestamp(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            shape: FieldShape::Timestamp,
        }
    }
}

/// Identifier list accepted in a lookup body, e.g. `civic_nos` -> `civicNos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupKey {
    pub name: &'static str,
    pub wire: &'static str,
}

/// Which pagination parameters a list endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    None,
    /// `limit` and `pageToken`.
    Cursor,
    /// `sortkey`, `limit`, and `pageToken`.
    Sorted,
}

/// A logical filter name after shape expansion, with its wire key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFilter {
    pub logical: String,
    pub wire: String,
    pub repeatable: bool,
}

impl AcceptedFilter {
    fn new(logical: impl Into<String>, wire: impl Into<String>, repeatable: bool) -> Self {
        Self {
            logical: logical.into(),
            wire: wire.into(),
            repeatable,
        }
    }
}

#[derive(Debug)]
pub struct EndpointDescriptor {
    pub resource: Resource,
    pub path: &'static str,
    pub filters: &'static [FilterField],
    /// Adds `meta_created_*` / `meta_modified_*`.
    pub meta_filters: bool,
    /// Logical names that must be present on every list call.
    pub required: &'static [&'static str],
    pub paging: Paging,
    /// Empty when the resource has no `/lookup` endpoint.
    pub lookup_keys: &'static [LookupKey],
    pub supports_expand: bool,
    pub supports_expand_reference_names: bool,
    pub supports_by_id: bool,
    pub supports_delete: bool,
}

const META_FILTERS: &[FilterField] = &[
    FilterField::timestamp("meta_created", "meta.created"),
    FilterField::timestamp("meta_modified", "meta.modified"),
];

const IDS: LookupKey = LookupKey {
    name: "ids",
    wire: "ids",
};

const IDS_ONLY: &[LookupKey] = &[IDS];

impl EndpointDescriptor {
    #[must_use]
    pub fn supports_lookup(&self) -> bool {
        !self.lookup_keys.is_empty()
    }

    /// Every logical filter name this endpoint's list call accepts.
    ///
    /// This is the single place where the range and timestamp naming
    /// conventions are applied.
    #[must_use]
    pub fn accepted_filters(&self) -> Vec<AcceptedFilter> {
        let meta: &[FilterField] = if self.meta_filters {
            META_FILTERS
        } else {
            &[]
        };

        let mut accepted = Vec::new();
        for field in self.filters.iter().chain(meta) {
            match field.shape {
                FieldShape::Scalar => {
                    accepted.push(AcceptedFilter::new(field.name, field.wire, false));
                }
                FieldShape::List => {
                    accepted.push(AcceptedFilter::new(field.name, field.wire, true));
                }
                FieldShape::Range => {
                    for (suffix, wire_suffix) in
                        [("on_or_before", "onOrBefore"), ("on_or_after", "onOrAfter")]
                    {
                        accepted.push(AcceptedFilter::new(
                            format!("{}_{suffix}", field.name),
                            format!("{}.{wire_suffix}", field.wire),
                            false,
                        ));
                    }
                }
                FieldShape::Timestamp => {
                    for suffix in ["before", "after"] {
                        accepted.push(AcceptedFilter::new(
                            format!("{}_{suffix}", field.name),
                            format!("{}.{suffix}", field.wire),
                            false,
                        ));
                    }
                }
            }
        }

        if self.supports_expand {
            accepted.push(AcceptedFilter::new("expand", "expand", true));
        }
        if self.supports_expand_reference_names {
            accepted.push(AcceptedFilter::new(
                "expand_reference_names",
                "expandReferenceNames",
                false,
            ));
        }
        if self.paging == Paging::Sorted {
            accepted.push(AcceptedFilter::new("sortkey", "sortkey", false));
        }
        if self.paging != Paging::None {
            accepted.push(AcceptedFilter::new("limit", "limit", false));
            accepted.push(AcceptedFilter::new("page_token", "pageToken", false));
        }
        accepted
    }

    /// Resolves one logical filter name against this endpoint.
    #[must_use]
    pub fn resolve_filter(&self, logical: &str) -> Option<AcceptedFilter> {
        self.accepted_filters()
            .into_iter()
            .find(|f| f.logical == logical)
    }

    #[must_use]
    pub fn lookup_key(&self, logical: &str) -> Option<&'static LookupKey> {
        self.lookup_keys.iter().find(|k| k.name == logical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Organisations,
    Persons,
    Placements,
    Duties,
    Groups,
    Programmes,
    StudyPlans,
    Syllabuses,
    SchoolUnitOfferings,
    Activities,
    CalendarEvents,
    Attendances,
    AttendanceEvents,
    AttendanceSchedules,
    Grades,
    AggregatedAttendances,
    Resources,
    Rooms,
    Subscriptions,
    DeletedEntities,
    Log,
    Statistics,
}

impl Resource {
    /// All resources, in descriptor-table order.
    pub const ALL: [Resource; 22] = [
        Resource::Organisations,
        Resource::Persons,
        Resource::Placements,
        Resource::Duties,
        Resource::Groups,
        Resource::Programmes,
        Resource::StudyPlans,
        Resource::Syllabuses,
        Resource::SchoolUnitOfferings,
        Resource::Activities,
        Resource::CalendarEvents,
        Resource::Attendances,
        Resource::AttendanceEvents,
        Resource::AttendanceSchedules,
        Resource::Grades,
        Resource::AggregatedAttendances,
        Resource::Resources,
        Resource::Rooms,
        Resource::Subscriptions,
        Resource::DeletedEntities,
        Resource::Log,
        Resource::Statistics,
    ];

    #[must_use]
    pub fn descriptor(self) -> &'static EndpointDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Path segment under the API root, without a leading slash.
    #[must_use]
    pub fn path(self) -> &'static str {
        self.descriptor().path
    }

    /// Kebab-case name used on the command line, e.g. `study-plans`.
    #[must_use]
    pub fn cli_name(self) -> &'static str {
        match self {
            Resource::Organisations => "organisations",
            Resource::Persons => "persons",
            Resource::Placements => "placements",
            Resource::Duties => "duties",
            Resource::Groups => "groups",
            Resource::Programmes => "programmes",
            Resource::StudyPlans => "study-plans",
            Resource::Syllabuses => "syllabuses",
            Resource::SchoolUnitOfferings => "school-unit-offerings",
            Resource::Activities => "activities",
            Resource::CalendarEvents => "calendar-events",
            Resource::Attendances => "attendances",
            Resource::AttendanceEvents => "attendance-events",
            Resource::AttendanceSchedules => "attendance-schedules",
            Resource::Grades => "grades",
            Resource::AggregatedAttendances => "aggregated-attendances",
            Resource::Resources => "resources",
            Resource::Rooms => "rooms",
            Resource::Subscriptions => "subscriptions",
            Resource::DeletedEntities => "deleted-entities",
            Resource::Log => "log",
            Resource::Statistics => "statistics",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResource(pub String);

impl fmt::Display for UnknownResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown SS12000 resource \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownResource {}

impl FromStr for Resource {
    type Err = UnknownResource;

    /// Accepts the wire path (`studyplans`, `schoolUnitOfferings`, any case,
    /// optional leading `/`) or the kebab-case CLI name (`study-plans`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('/');
        Resource::ALL
            .into_iter()
            .find(|r| r.path().eq_ignore_ascii_case(wanted) || r.cli_name() == wanted)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

const START_DATE: FilterField = FilterField::range("start_date", "startDate");
const END_DATE: FilterField = FilterField::range("end_date", "endDate");

/// Shorthand for the common "full" entity endpoint: lookup by ids, expand,
/// by-id, meta filters and sorted paging.
const fn entity(
    resource: Resource,
    path: &'static str,
    filters: &'static [FilterField],
) -> EndpointDescriptor {
    EndpointDescriptor {
        resource,
        path,
        filters,
        meta_filters: true,
        required: &[],
        paging: Paging::Sorted,
        lookup_keys: IDS_ONLY,
        supports_expand: true,
        supports_expand_reference_names: true,
        supports_by_id: true,
        supports_delete: false,
    }
}

/// Like [`entity`] but without `expand` support.
const fn entity_without_expand(
    resource: Resource,
    path: &'static str,
    filters: &'static [FilterField],
    lookup_keys: &'static [LookupKey],
) -> EndpointDescriptor {
    EndpointDescriptor {
        lookup_keys,
        supports_expand: false,
        ..entity(resource, path, filters)
    }
}

/// GET-only reporting endpoints (`log`, `statistics`).
const fn report(
    resource: Resource,
    path: &'static str,
    filters: &'static [FilterField],
) -> EndpointDescriptor {
    EndpointDescriptor {
        lookup_keys: &[],
        supports_expand: false,
        supports_expand_reference_names: false,
        supports_by_id: false,
        ..entity(resource, path, filters)
    }
}

const ORGANISATIONS_FILTERS: &[FilterField] = &[
    FilterField::scalar("parent", "parent"),
    FilterField::scalar("school_unit_code", "schoolUnitCode"),
    FilterField::scalar("organisation_code", "organisationCode"),
    FilterField::scalar("municipality_code", "municipalityCode"),
    FilterField::scalar("type", "type"),
    FilterField::list("school_types", "schoolTypes"),
    START_DATE,
    END_DATE,
];

const ORGANISATIONS_LOOKUP: &[LookupKey] = &[
    IDS,
    LookupKey {
        name: "school_unit_codes",
        wire: "schoolUnitCodes",
    },
    LookupKey {
        name: "organisation_codes",
        wire: "organisationCodes",
    },
];

const PERSONS_LOOKUP: &[LookupKey] = &[
    IDS,
    LookupKey {
        name: "civic_nos",
        wire: "civicNos",
    },
];

const PERSONS_FILTERS: &[FilterField] = &[
    FilterField::scalar("name_contains", "nameContains"),
    FilterField::scalar("civic_no", "civicNo"),
    FilterField::scalar("edu_person_principal_name", "eduPersonPrincipalName"),
    FilterField::scalar("identifier_value", "identifier.value"),
    FilterField::scalar("identifier_context", "identifier.context"),
    FilterField::scalar("relationship_entity_type", "relationship.entity.type"),
    FilterField::scalar("relationship_organisation", "relationship.organisation"),
    FilterField::range("relationship_start_date", "relationship.startDate"),
    FilterField::range("relationship_end_date", "relationship.endDate"),
];

const PLACEMENTS_FILTERS: &[FilterField] = &[
    FilterField::scalar("child", "child"),
    FilterField::scalar("group", "group"),
    FilterField::scalar("owner", "owner"),
    FilterField::scalar("placed_at", "placedAt"),
    FilterField::scalar("school_type", "schoolType"),
    START_DATE,
    END_DATE,
];

const DUTIES_FILTERS: &[FilterField] = &[
    FilterField::scalar("person", "person"),
    FilterField::scalar("duty_at", "dutyAt"),
    FilterField::scalar("duty_role", "dutyRole"),
    FilterField::scalar("signature", "signature"),
    START_DATE,
    END_DATE,
];

const GROUPS_FILTERS: &[FilterField] = &[
    FilterField::scalar("group_type", "groupType"),
    FilterField::scalar("school_type", "schoolType"),
    FilterField::scalar("organisation", "organisation"),
    START_DATE,
    END_DATE,
];

const PROGRAMMES_FILTERS: &[FilterField] = &[
    FilterField::scalar("name_contains", "nameContains"),
    FilterField::scalar("type", "type"),
    FilterField::scalar("parent_programme", "parentProgramme"),
    FilterField::scalar("school_type", "schoolType"),
    FilterField::scalar("code", "code"),
];

const STUDY_PLANS_FILTERS: &[FilterField] = &[
    FilterField::scalar("student", "student"),
    START_DATE,
    END_DATE,
];

const SYLLABUSES_FILTERS: &[FilterField] = &[
    FilterField::scalar("school_type", "schoolType"),
    FilterField::scalar("subject_code", "subjectCode"),
    FilterField::scalar("subject_name_contains", "subjectNameContains"),
    FilterField::scalar("subject_designation", "subjectDesignation"),
    FilterField::scalar("course_code", "courseCode"),
    FilterField::scalar("course_name_contains", "courseNameContains"),
    FilterField::range("start_school_year", "startSchoolYear"),
    FilterField::range("end_school_year", "endSchoolYear"),
    FilterField::range("points", "points"),
    FilterField::scalar("curriculum", "curriculum"),
    FilterField::scalar("language_code", "languageCode"),
    FilterField::scalar("official", "official"),
];

const SCHOOL_UNIT_OFFERINGS_FILTERS: &[FilterField] = &[
    FilterField::scalar("offered_at", "offeredAt"),
    FilterField::list("offered_syllabuses", "offeredSyllabuses"),
    FilterField::list("offered_programmes", "offeredProgrammes"),
    START_DATE,
    END_DATE,
];

const ACTIVITIES_FILTERS: &[FilterField] = &[
    FilterField::scalar("organisation", "organisation"),
    FilterField::scalar("syllabus", "syllabus"),
    FilterField::scalar("activity_type", "activityType"),
    FilterField::scalar("calendar_events_required", "calendarEventsRequired"),
    START_DATE,
    END_DATE,
];

const CALENDAR_EVENTS_FILTERS: &[FilterField] = &[
    FilterField::scalar("activity", "activity"),
    FilterField::range("start_time", "startTime"),
    FilterField::range("end_time", "endTime"),
    FilterField::scalar("cancelled", "cancelled"),
    FilterField::scalar("room", "room"),
    FilterField::scalar("resource", "resource"),
];

const ATTENDANCES_FILTERS: &[FilterField] = &[
    FilterField::scalar("calendar_event", "calendarEvent"),
    FilterField::scalar("student", "student"),
    FilterField::scalar("reporter", "reporter"),
    FilterField::scalar("is_reported", "isReported"),
    FilterField::range("reported_timestamp", "reportedTimestamp"),
];

const ATTENDANCE_EVENTS_FILTERS: &[FilterField] = &[
    FilterField::scalar("person", "person"),
    FilterField::scalar("registered_by", "registeredBy"),
    FilterField::scalar("group", "group"),
    FilterField::scalar("room", "room"),
    FilterField::range("time", "time"),
    FilterField::scalar("event_type", "eventType"),
];

const ATTENDANCE_SCHEDULES_FILTERS: &[FilterField] = &[
    FilterField::scalar("placement", "placement"),
    FilterField::range("number_of_weeks", "numberOfWeeks"),
    START_DATE,
    END_DATE,
    FilterField::scalar("temporary", "temporary"),
    FilterField::scalar("state", "state"),
];

const GRADES_FILTERS: &[FilterField] = &[
    FilterField::scalar("student", "student"),
    FilterField::scalar("school_unit", "schoolUnit"),
    FilterField::scalar("registered_by", "registeredBy"),
    FilterField::scalar("grading_teacher", "gradingTeacher"),
    FilterField::scalar("group", "group"),
    FilterField::range("registered_date", "registeredDate"),
    FilterField::scalar("grade_value", "gradeValue"),
    FilterField::scalar("final_grade", "finalGrade"),
    FilterField::scalar("trial", "trial"),
    FilterField::scalar("adapted_study_plan", "adaptedStudyPlan"),
    FilterField::scalar("correction_type", "correctionType"),
    FilterField::scalar("converted", "converted"),
    FilterField::scalar("semester", "semester"),
    FilterField::range("year", "year"),
    FilterField::scalar("syllabus", "syllabus"),
];

const AGGREGATED_ATTENDANCES_FILTERS: &[FilterField] = &[
    FilterField::scalar("activity", "activity"),
    FilterField::scalar("student", "student"),
    START_DATE,
    END_DATE,
];

const RESOURCES_FILTERS: &[FilterField] = &[
    FilterField::scalar("owner", "owner"),
    FilterField::scalar("name_contains", "nameContains"),
];

const ROOMS_FILTERS: &[FilterField] = &[
    FilterField::scalar("owner", "owner"),
    FilterField::scalar("name_contains", "nameContains"),
];

const DELETED_ENTITIES_FILTERS: &[FilterField] = &[
    FilterField::list("entities", "entities"),
    FilterField::scalar("meta_modified_after", "meta.modified.after"),
];

const LOG_FILTERS: &[FilterField] = &[
    FilterField::scalar("source", "source"),
    FilterField::scalar("target", "target"),
    FilterField::scalar("event_type", "eventType"),
    FilterField::range("timestamp", "timestamp"),
];

const STATISTICS_FILTERS: &[FilterField] = &[
    FilterField::scalar("source", "source"),
    FilterField::scalar("target", "target"),
    FilterField::scalar("statistic_type", "statisticType"),
    FilterField::range("timestamp", "timestamp"),
];

static DESCRIPTORS: [EndpointDescriptor; 22] = [
    entity_without_expand(
        Resource::Organisations,
        "organisations",
        ORGANISATIONS_FILTERS,
        ORGANISATIONS_LOOKUP,
    ),
    EndpointDescriptor {
        lookup_keys: PERSONS_LOOKUP,
        ..entity(Resource::Persons, "persons", PERSONS_FILTERS)
    },
    entity(Resource::Placements, "placements", PLACEMENTS_FILTERS),
    entity(Resource::Duties, "duties", DUTIES_FILTERS),
    entity(Resource::Groups, "groups", GROUPS_FILTERS),
    entity(Resource::Programmes, "programmes", PROGRAMMES_FILTERS),
    entity(Resource::StudyPlans, "studyplans", STUDY_PLANS_FILTERS),
    entity_without_expand(Resource::Syllabuses, "syllabuses", SYLLABUSES_FILTERS, IDS_ONLY),
    entity(Resource::SchoolUnitOfferings, "schoolUnitOfferings", SCHOOL_UNIT_OFFERINGS_FILTERS),
    entity(Resource::Activities, "activities", ACTIVITIES_FILTERS),
    entity(Resource::CalendarEvents, "calendarEvents", CALENDAR_EVENTS_FILTERS),
    EndpointDescriptor {
        supports_delete: true,
        ..entity(Resource::Attendances, "attendances", ATTENDANCES_FILTERS)
    },
    entity(Resource::AttendanceEvents, "attendanceEvents", ATTENDANCE_EVENTS_FILTERS),
    entity(Resource::AttendanceSchedules, "attendanceSchedules", ATTENDANCE_SCHEDULES_FILTERS),
    entity(Resource::Grades, "grades", GRADES_FILTERS),
    entity(Resource::AggregatedAttendances, "aggregatedAttendance", AGGREGATED_ATTENDANCES_FILTERS),
    entity_without_expand(Resource::Resources, "resources", RESOURCES_FILTERS, IDS_ONLY),
    entity_without_expand(Resource::Rooms, "rooms", ROOMS_FILTERS, IDS_ONLY),
    EndpointDescriptor {
        resource: Resource::Subscriptions,
        path: "subscriptions",
        filters: &[],
        meta_filters: false,
        required: &[],
        paging: Paging::Cursor,
        lookup_keys: &[],
        supports_expand: false,
        supports_expand_reference_names: false,
        supports_by_id: true,
        supports_delete: true,
    },
    EndpointDescriptor {
        resource: Resource::DeletedEntities,
        path: "deletedEntities",
        filters: DELETED_ENTITIES_FILTERS,
        meta_filters: false,
        required: &["entities"],
        paging: Paging::None,
        lookup_keys: &[],
        supports_expand: false,
        supports_expand_reference_names: false,
        supports_by_id: false,
        supports_delete: false,
    },
    report(Resource::Log, "log", LOG_FILTERS),
    report(Resource::Statistics, "statistics", STATISTICS_FILTERS),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn descriptor_table_is_indexed_by_resource() {
        for resource in Resource::ALL {
            assert_eq!(resource.descriptor().resource, resource);
        }
    }

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<_> = Resource::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(paths.len(), Resource::ALL.len());
    }

    #[test]
    fn from_str_accepts_path_and_cli_name() {
        for resource in Resource::ALL {
            assert_eq!(resource.path().parse::<Resource>(), Ok(resource));
            assert_eq!(resource.cli_name().parse::<Resource>(), Ok(resource));
        }
        assert_eq!(
            "/SchoolUnitOfferings".parse::<Resource>(),
            Ok(Resource::SchoolUnitOfferings)
        );
        assert_eq!("studyplans".parse::<Resource>(), Ok(Resource::StudyPlans));
        assert!("teachers".parse::<Resource>().is_err());
    }

    #[test]
    fn logical_names_are_unique_per_resource() {
        for resource in Resource::ALL {
            let accepted = resource.descriptor().accepted_filters();
            let names: HashSet<_> = accepted.iter().map(|f| f.logical.as_str()).collect();
            assert_eq!(names.len(), accepted.len(), "duplicate filter on {resource}");
        }
    }

    #[test]
    fn range_fields_expand_to_on_or_before_and_on_or_after() {
        let d = Resource::Syllabuses.descriptor();
        assert_eq!(
            d.resolve_filter("points_on_or_before").map(|f| f.wire),
            Some("points.onOrBefore".to_owned())
        );
        assert_eq!(
            d.resolve_filter("start_school_year_on_or_after").map(|f| f.wire),
            Some("startSchoolYear.onOrAfter".to_owned())
        );
        assert!(d.resolve_filter("points").is_none());
    }

    #[test]
    fn meta_filters_follow_before_after_convention() {
        let d = Resource::Grades.descriptor();
        for (logical, wire) in [
            ("meta_created_before", "meta.created.before"),
            ("meta_created_after", "meta.created.after"),
            ("meta_modified_before", "meta.modified.before"),
            ("meta_modified_after", "meta.modified.after"),
        ] {
            assert_eq!(d.resolve_filter(logical).map(|f| f.wire), Some(wire.to_owned()));
        }
    }

    #[test]
    fn subscriptions_page_without_sortkey_or_meta() {
        let d = Resource::Subscriptions.descriptor();
        assert!(d.resolve_filter("limit").is_some());
        assert!(d.resolve_filter("page_token").is_some());
        assert!(d.resolve_filter("sortkey").is_none());
        assert!(d.resolve_filter("meta_created_before").is_none());
        assert!(!d.supports_lookup());
    }

    #[test]
    fn deleted_entities_only_accepts_entities_and_modified_after() {
        let logical: Vec<_> = Resource::DeletedEntities
            .descriptor()
            .accepted_filters()
            .into_iter()
            .map(|f| f.logical)
            .collect();
        assert_eq!(logical, vec!["entities", "meta_modified_after"]);
    }

    #[test]
    fn expand_support_matches_api() {
        let without_expand = [
            Resource::Organisations,
            Resource::Syllabuses,
            Resource::Resources,
            Resource::Rooms,
            Resource::Subscriptions,
            Resource::DeletedEntities,
            Resource::Log,
            Resource::Statistics,
        ];
        for resource in Resource::ALL {
            assert_eq!(
                resource.descriptor().supports_expand,
                !without_expand.contains(&resource),
                "expand support mismatch for {resource}"
            );
        }
    }

    #[test]
    fn only_attendances_and_subscriptions_support_delete() {
        let deletable: Vec<_> = Resource::ALL
            .into_iter()
            .filter(|r| r.descriptor().supports_delete)
            .collect();
        assert_eq!(deletable, vec![Resource::Attendances, Resource::Subscriptions]);
    }

    #[test]
    fn organisation_and_person_lookups_accept_extra_identifier_lists() {
        let orgs = Resource::Organisations.descriptor();
        assert_eq!(orgs.lookup_key("school_unit_codes").map(|k| k.wire), Some("schoolUnitCodes"));
        assert_eq!(orgs.lookup_key("organisation_codes").map(|k| k.wire), Some("organisationCodes"));
        let persons = Resource::Persons.descriptor();
        assert_eq!(persons.lookup_key("civic_nos").map(|k| k.wire), Some("civicNos"));
        assert!(Resource::Groups.descriptor().lookup_key("civic_nos").is_none());
    }
}
