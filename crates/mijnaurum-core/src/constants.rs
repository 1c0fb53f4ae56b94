// ABOUTME: Constants for the MijnAurum V2 API and the emitted metric schema
// ABOUTME: Endpoint paths, header names, defaults, tag keys and field keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

//! Constants organized by domain

/// Remote service endpoints
pub mod endpoints {
    /// Production host of the MijnAurum portal
    pub const DEFAULT_BASE_URL: &str = "https://mijnaurum.nl";
    /// Credential exchange
    pub const AUTHENTICATION: &str = "/user/v2/authentication";
    /// Prefix of every per-user resource, followed by `{userId}/`
    pub const USERS: &str = "/user/v2/users";
    /// Per-user metering source catalog
    pub const SOURCES: &str = "sources";
    /// Per-user current-period usage
    pub const ACTUALS: &str = "actuals";
}

/// HTTP header names and values
pub mod headers {
    /// Session token header, both in authentication responses and authenticated requests
    pub const AUTH_TOKEN: &str = "Auth-Token";
    /// Content type used for every request
    pub const APPLICATION_JSON: &str = "application/json";
}

/// Operation names used in errors and log fields
pub mod operations {
    /// `POST /user/v2/authentication`
    pub const AUTHENTICATE: &str = "authenticate";
    /// `GET /user/v2/users/{userId}/sources`
    pub const SOURCES: &str = "sources";
    /// `GET /user/v2/users/{userId}/actuals`
    pub const ACTUALS: &str = "actuals";
}

/// Timeouts in seconds
pub mod timeouts {
    /// Per-request timeout
    pub const HTTP_REQUEST_SECS: u64 = 30;
    /// TCP/TLS connect timeout
    pub const HTTP_CONNECT_SECS: u64 = 10;
    /// Deadline for a whole gather cycle
    pub const CYCLE_SECS: u64 = 60;
    /// Interval between cycles in the host binary
    pub const INTERVAL_SECS: u64 = 60;
}

/// Emitted metric schema
pub mod metric {
    /// Measurement name shared by all emitted metrics
    pub const NAME: &str = "heat usage";

    /// Tag keys
    pub mod tags {
        /// Source identifier of the actual record
        pub const SOURCE: &str = "source";
        /// Source type (`heat`)
        pub const SOURCE_TYPE: &str = "source_type";
        /// Rate unit from the catalog entry
        pub const RATE_UNIT: &str = "rate_unit";
        /// Unit from the catalog entry
        pub const UNIT: &str = "unit";
        /// Meter identifier from the catalog entry
        pub const METER_ID: &str = "meter_id";
        /// Location identifier from the catalog entry
        pub const LOCATION_ID: &str = "location_id";
    }

    /// Field keys
    pub mod fields {
        /// Usage so far today
        pub const DAY_VALUE: &str = "day_value";
        /// Cost so far today
        pub const DAY_COST: &str = "day_cost";
        /// Usage so far this week
        pub const WEEK_VALUE: &str = "week_value";
        /// Cost so far this week
        pub const WEEK_COST: &str = "week_cost";
        /// Usage so far this month
        pub const MONTH_VALUE: &str = "month_value";
        /// Cost so far this month
        pub const MONTH_COST: &str = "month_cost";
        /// Usage so far this year
        pub const YEAR_VALUE: &str = "year_value";
        /// Cost so far this year
        pub const YEAR_COST: &str = "year_cost";
    }
}
