// Handles region things
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_config::meta::region::future;
use aws_config::meta::region::ProvideRegion;
use aws_types::region;
use std::env;
use tracing::debug;

/// Region used when nothing better is known: buckets with an empty location
/// constraint live here, and it stands in for failed location lookups.
pub const DEFAULT_REGION: &str = "us-east-1";

// Very old buckets in Ireland report the `EU` location constraint rather
// than a region name.
const LEGACY_EU_LOCATION: &str = "EU";
const LEGACY_EU_REGION: &str = "eu-west-1";

/// An AWS region, which may be unset if none was configured.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Region {
    region: Option<region::Region>,
}

impl Region {
    /// Returns a `Region` taken from `AWS_REGION` or `AWS_DEFAULT_REGION` in
    /// the environment, if either is set.
    pub fn new() -> Self {
        // By default, we try to get a region from the environment, this might
        // be overridden later depending on CLI options.
        let possibilities = vec![
            env::var("AWS_REGION"),
            env::var("AWS_DEFAULT_REGION"),
        ];

        let region = possibilities
            .iter()
            .find_map(|region| region.as_ref().ok())
            .map(|region| region::Region::new(region.to_owned()));

        debug!("AWS_REGION in environment is: {:?}", region);

        Self {
            region,
        }
    }

    /// Returns the `DEFAULT_REGION`.
    pub fn default_region() -> Self {
        Self::default().set_region(DEFAULT_REGION)
    }

    /// Returns the region a bucket lives in given its `GetBucketLocation`
    /// location constraint.
    ///
    /// Location constraints for sufficiently old buckets may not quite meet
    /// expectations: an empty or missing constraint means `us-east-1` and
    /// `EU` means `eu-west-1`.
    pub fn from_location_constraint(location: Option<&str>) -> Self {
        debug!("from_location_constraint: {:?}", location);

        let region = match location {
            None | Some("")          => DEFAULT_REGION,
            Some(LEGACY_EU_LOCATION) => LEGACY_EU_REGION,
            Some(location)           => location,
        };

        Self::default().set_region(region)
    }

    /// Returns `true` if a region name is present.
    pub fn is_set(&self) -> bool {
        self.region.is_some()
    }

    /// Returns the region name
    pub fn name(&self) -> &str {
        match &self.region {
            Some(region) => region.as_ref(),
            None         => "default",
        }
    }

    /// Sets the region name.
    pub fn set_region(mut self, region: &str) -> Self {
        debug!("Region set to: {:?}", region);

        let region = region::Region::new(region.to_string());
        self.region = Some(region);
        self
    }

    /// Returns the AWS SDK `Region`, if set.
    pub fn to_sdk(&self) -> Option<region::Region> {
        self.region.to_owned()
    }
}

impl ProvideRegion for Region {
    // Takes our region string and returns a proper AWS Region, this should
    // allow us to pass our Region into AWS SDK functions expecting an AWS
    // Region.
    fn region(&self) -> future::ProvideRegion<'_> {
        future::ProvideRegion::ready(self.region.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_location_constraint() {
        let tests = vec![
            (None,                 "us-east-1"),
            (Some(""),             "us-east-1"),
            (Some("EU"),           "eu-west-1"),
            (Some("eu-west-1"),    "eu-west-1"),
            (Some("ap-south-1"),   "ap-south-1"),
        ];

        for test in tests {
            let location = test.0;
            let expected = test.1;

            let ret = Region::from_location_constraint(location);

            assert_eq!(ret.name(), expected);
        }
    }

    #[test]
    fn test_region_name() {
        let region = Region::default();

        assert!(!region.is_set());
        assert_eq!(region.name(), "default");
        assert_eq!(region.to_sdk(), None);

        let region = region.set_region("eu-west-2");

        assert!(region.is_set());
        assert_eq!(region.name(), "eu-west-2");
        assert_eq!(region.to_sdk(), Some(region::Region::new("eu-west-2")));
    }

    #[test]
    fn test_default_region() {
        let region = Region::default_region();

        assert_eq!(region.name(), DEFAULT_REGION);
    }

    #[tokio::test]
    async fn test_provide_region() {
        let region = Region::default().set_region("sa-east-1");

        let ret = region.region().await;

        assert_eq!(ret, Some(region::Region::new("sa-east-1")));
    }
}
