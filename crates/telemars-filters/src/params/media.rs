//! Parameters for platform, playback, advertising and break filters.

use super::api_enum;

api_enum! {
    /// Viewing platform.
    pub enum Platform: Int {
        Tv = 1,
        Desktop = 2,
        Mobile = 3,
    }
}

api_enum! {
    /// Live or recorded playback.
    pub enum PlaybackType: Int {
        Live = 1,
        RecVosdal = 2,
        RecTimeshift = 3,
    }
}

api_enum! {
    /// Whether an ad spot actually aired.
    pub enum AdIssueStatusId: Text {
        Real = "R",
        Virtual = "V",
    }
}

api_enum! {
    /// Kind of advertising placement.
    pub enum AdTypeId: Int {
        Spot = 1,
        ExternalSponsor = 5,
        SponsorInclusion = 10,
        Announcement = 15,
    }
}

api_enum! {
    /// Content of an advertising break.
    pub enum BreaksContentType: Text {
        Commercial = "C",
        Promo = "P",
        Sponsor = "S",
    }
}

api_enum! {
    /// Whether a break actually aired.
    pub enum BreaksIssueStatusId: Text {
        Real = "R",
        Virtual = "V",
    }
}

api_enum! {
    /// How a break was distributed.
    pub enum BreaksDistributionType: Text {
        Network = "N",
        Orbital = "O",
        Local = "R",
    }
}
