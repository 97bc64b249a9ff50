//! Templated sweeps over vote-number axes.
//!
//! A [`Sweep`] is a URL template plus an ordered list of inclusive integer
//! [`Axis`] ranges. Iterating it walks the cartesian product of the axes
//! (outermost first, like nested `for` loops) and yields one [`Target`] per
//! step. House and Senate collections are just two preset sweeps.
//!
//! The sweep enumerates every combination in range. It has no idea where a
//! year's real votes end, so most of a default sweep resolves to 404s.

use std::ops::RangeInclusive;

use serde::{Serialize, Serializer};

use crate::error::CollectError;
use crate::log::Logger;
use crate::template::{TemplateError, UrlTemplate};

pub const HOUSE_URL_TEMPLATE: &str = "https://clerk.house.gov/evs/{year}/roll{vote}.xml";
pub const SENATE_URL_TEMPLATE: &str = concat!(
    "https://www.senate.gov/legislative/LIS/roll_call_votes/",
    "vote{order}{session}/vote_{order}_{session}_{vote}.xml"
);

pub const HOUSE_YEARS: RangeInclusive<u32> = 1993..=2021;
pub const HOUSE_VOTES: RangeInclusive<u32> = 1..=999;
pub const SENATE_CONGRESSES: RangeInclusive<u32> = 101..=117;
pub const SENATE_SESSIONS: RangeInclusive<u32> = 1..=2;
pub const SENATE_VOTES: RangeInclusive<u32> = 1..=999;

/// One named dimension of a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    pub name: String,
    pub range: RangeInclusive<u32>,
    /// Zero-pad width for the rendered value (0 = no padding).
    pub pad: usize,
    /// Log a line every time iteration enters a new value of this axis.
    pub announce: bool,
}

impl Axis {
    pub fn new(name: impl Into<String>, range: RangeInclusive<u32>) -> Self {
        Self {
            name: name.into(),
            range,
            pad: 0,
            announce: false,
        }
    }

    pub fn padded(mut self, width: usize) -> Self {
        self.pad = width;
        self
    }

    pub fn announced(mut self) -> Self {
        self.announce = true;
        self
    }

    pub fn render(&self, value: u32) -> String {
        format!("{value:0width$}", width = self.pad)
    }

    pub fn len(&self) -> u64 {
        if self.range.is_empty() {
            0
        } else {
            u64::from(self.range.end() - self.range.start()) + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A template swept over a set of axes.
#[derive(Debug, Clone)]
pub struct Sweep {
    name: String,
    template: UrlTemplate,
    axes: Vec<Axis>,
}

impl Sweep {
    /// `name` doubles as the output file prefix: `{name}_{axis values...}.xml`.
    pub fn new(
        name: impl Into<String>,
        template: &str,
        axes: Vec<Axis>,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            name: name.into(),
            template: UrlTemplate::parse(template)?,
            axes,
        })
    }

    /// House clerk sweep: `house_{year}_{vote:03}.xml`.
    pub fn house(
        years: RangeInclusive<u32>,
        votes: RangeInclusive<u32>,
    ) -> Result<Self, TemplateError> {
        Self::new(
            "house",
            HOUSE_URL_TEMPLATE,
            vec![
                Axis::new("year", years).announced(),
                Axis::new("vote", votes).padded(3),
            ],
        )
    }

    /// Senate LIS sweep: `senate_{order}_{session}_{vote:05}.xml`.
    pub fn senate(
        congresses: RangeInclusive<u32>,
        sessions: RangeInclusive<u32>,
        votes: RangeInclusive<u32>,
    ) -> Result<Self, TemplateError> {
        Self::new(
            "senate",
            SENATE_URL_TEMPLATE,
            vec![
                Axis::new("order", congresses),
                Axis::new("session", sessions),
                Axis::new("vote", votes).padded(5),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// Number of targets a full iteration yields, saturating at `u64::MAX`.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        self.axes
            .iter()
            .map(Axis::len)
            .fold(1u64, u64::saturating_mul)
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty() || self.axes.iter().any(Axis::is_empty)
    }

    /// Start a fresh pass over the sweep. Each call restarts from the first
    /// target; boundary announcements go to `logger`.
    pub fn targets<'a>(&'a self, logger: &'a dyn Logger) -> Targets<'a> {
        Targets {
            sweep: self,
            logger,
            cursor: None,
            done: self.is_empty(),
        }
    }

    fn component(&self) -> String {
        format!("rollcall.sweep.{}", self.name)
    }
}

/// One URL to try, with the metadata it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub url: String,
    #[serde(serialize_with = "params_as_map")]
    pub params: Vec<(String, String)>,
    pub file_name: String,
}

impl Target {
    /// Rendered value of the named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn params_as_map<S: Serializer>(
    params: &[(String, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(params.iter().map(|(k, v)| (k, v)))
}

/// Lazy iterator over a [`Sweep`], created by [`Sweep::targets`].
///
/// Yields `Err` at most once: a template or log failure ends the pass.
pub struct Targets<'a> {
    sweep: &'a Sweep,
    logger: &'a dyn Logger,
    cursor: Option<Vec<u32>>,
    done: bool,
}

impl Targets<'_> {
    /// Move the cursor forward. Returns the index of the outermost axis whose
    /// value changed, or `None` once the sweep is exhausted.
    fn advance(&mut self) -> Option<usize> {
        let sweep = self.sweep;
        let axes = &sweep.axes;
        if self.cursor.is_none() {
            self.cursor = Some(axes.iter().map(|a| *a.range.start()).collect());
            return Some(0);
        }
        let cursor = self.cursor.as_mut()?;
        for i in (0..axes.len()).rev() {
            if cursor[i] < *axes[i].range.end() {
                cursor[i] += 1;
                for (j, axis) in axes.iter().enumerate().skip(i + 1) {
                    cursor[j] = *axis.range.start();
                }
                return Some(i);
            }
        }
        None
    }

    fn build(&self, changed: usize) -> Result<Target, CollectError> {
        let sweep = self.sweep;
        let cursor = self.cursor.as_deref().unwrap_or_default();

        for (axis, &value) in sweep.axes.iter().zip(cursor).skip(changed) {
            if axis.announce {
                self.logger.info(
                    &sweep.component(),
                    &format!("Starting Collection for {}:{}", axis.name, value),
                )?;
            }
        }

        let params: Vec<(String, String)> = sweep
            .axes
            .iter()
            .zip(cursor)
            .map(|(axis, &value)| (axis.name.clone(), axis.render(value)))
            .collect();
        let url = sweep.template.render(&params)?;

        let mut file_name = sweep.name.clone();
        for (_, value) in &params {
            file_name.push('_');
            file_name.push_str(value);
        }
        file_name.push_str(".xml");

        Ok(Target {
            url,
            params,
            file_name,
        })
    }
}

impl Iterator for Targets<'_> {
    type Item = Result<Target, CollectError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some(changed) = self.advance() else {
            self.done = true;
            return None;
        };
        let item = self.build(changed);
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

impl std::iter::FusedIterator for Targets<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogRecord;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<LogRecord>>);

    impl Logger for Recorder {
        fn write_record(&self, record: &LogRecord) -> io::Result<()> {
            self.0.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    impl Recorder {
        fn messages(&self) -> Vec<String> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.message.clone())
                .collect()
        }
    }

    struct Broken;

    impl Logger for Broken {
        fn write_record(&self, _: &LogRecord) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn house_small_range() {
        let sweep = Sweep::house(2020..=2020, 1..=3).unwrap();
        let log = Recorder::default();
        let targets: Vec<Target> = sweep.targets(&log).map(Result::unwrap).collect();

        assert_eq!(targets.len(), 3);
        for (n, t) in targets.iter().enumerate() {
            let n = n + 1;
            assert_eq!(t.url, format!("https://clerk.house.gov/evs/2020/roll00{n}.xml"));
            assert_eq!(t.param("year"), Some("2020"));
            assert_eq!(t.param("vote"), Some(format!("00{n}").as_str()));
            assert_eq!(t.file_name, format!("house_2020_00{n}.xml"));
        }
        assert_eq!(log.messages(), vec!["Starting Collection for year:2020"]);
    }

    #[test]
    fn house_announces_each_year_once() {
        let sweep = Sweep::house(2019..=2021, 1..=2).unwrap();
        let log = Recorder::default();
        let count = sweep.targets(&log).count();
        assert_eq!(count, 6);
        assert_eq!(
            log.messages(),
            vec![
                "Starting Collection for year:2019",
                "Starting Collection for year:2020",
                "Starting Collection for year:2021",
            ]
        );
        let modes: Vec<String> = log.0.lock().unwrap().iter().map(|r| r.mode.clone()).collect();
        assert!(modes.iter().all(|m| m == "rollcall.sweep.house.Info"));
    }

    #[test]
    fn senate_small_range() {
        let sweep = Sweep::senate(101..=101, 1..=1, 1..=2).unwrap();
        let log = Recorder::default();
        let targets: Vec<Target> = sweep.targets(&log).map(Result::unwrap).collect();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].param("vote"), Some("00001"));
        assert_eq!(targets[1].param("vote"), Some("00002"));
        assert_eq!(
            targets[1].url,
            "https://www.senate.gov/legislative/LIS/roll_call_votes/vote1011/vote_101_1_00002.xml"
        );
        assert_eq!(targets[1].file_name, "senate_101_1_00002.xml");
        assert!(log.messages().is_empty());
    }

    #[test]
    fn senate_nesting_order() {
        let sweep = Sweep::senate(101..=102, 1..=2, 1..=1).unwrap();
        let log = Recorder::default();
        let names: Vec<String> = sweep
            .targets(&log)
            .map(|t| t.unwrap().file_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "senate_101_1_00001.xml",
                "senate_101_2_00001.xml",
                "senate_102_1_00001.xml",
                "senate_102_2_00001.xml",
            ]
        );
    }

    #[test]
    fn default_sweep_sizes() {
        assert_eq!(Sweep::house(HOUSE_YEARS, HOUSE_VOTES).unwrap().len(), 29 * 999);
        assert_eq!(
            Sweep::senate(SENATE_CONGRESSES, SENATE_SESSIONS, SENATE_VOTES)
                .unwrap()
                .len(),
            17 * 2 * 999
        );
    }

    #[test]
    fn targets_restart_from_beginning() {
        let sweep = Sweep::house(2020..=2020, 5..=6).unwrap();
        let log = Recorder::default();
        let first: Vec<Target> = sweep.targets(&log).map(Result::unwrap).collect();
        let second: Vec<Target> = sweep.targets(&log).map(Result::unwrap).collect();
        assert_eq!(first, second);
        assert_eq!(first[0].param("vote"), Some("005"));
    }

    #[test]
    fn empty_range_yields_nothing() {
        #[allow(clippy::reversed_empty_ranges)]
        let sweep = Sweep::house(2021..=2020, 1..=3).unwrap();
        let log = Recorder::default();
        assert!(sweep.is_empty());
        assert_eq!(sweep.targets(&log).count(), 0);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn missing_placeholder_value_is_an_error() {
        let sweep = Sweep::new(
            "custom",
            "https://example.org/{year}/{chamber}",
            vec![Axis::new("year", 2020..=2021)],
        )
        .unwrap();
        let log = Recorder::default();
        let mut targets = sweep.targets(&log);
        match targets.next() {
            Some(Err(CollectError::Template(TemplateError::MissingKey(key)))) => {
                assert_eq!(key, "chamber")
            }
            other => panic!("expected missing key error, got {other:?}"),
        }
        assert!(targets.next().is_none());
    }

    #[test]
    fn log_failure_ends_the_pass() {
        let sweep = Sweep::house(2020..=2020, 1..=3).unwrap();
        let mut targets = sweep.targets(&Broken);
        assert!(matches!(targets.next(), Some(Err(CollectError::Io(_)))));
        assert!(targets.next().is_none());
    }

    #[test]
    fn target_serializes_params_as_map() {
        let sweep = Sweep::house(2021..=2021, 7..=7).unwrap();
        let log = Recorder::default();
        let target = sweep.targets(&log).next().unwrap().unwrap();
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"url":"https://clerk.house.gov/evs/2021/roll007.xml","#,
                r#""params":{"year":"2021","vote":"007"},"#,
                r#""file_name":"house_2021_007.xml"}"#,
            )
        );
    }

    #[test]
    fn full_width_axes_saturate_count() {
        let sweep = Sweep::senate(0..=u32::MAX, 1..=2, 0..=u32::MAX).unwrap();
        assert_eq!(sweep.len(), u64::MAX);
        assert!(!sweep.is_empty());
    }

    #[test]
    fn full_width_axes_still_iterate() {
        let sweep = Sweep::new(
            "wide",
            "https://example.org/{a}/{b}/{c}",
            vec![
                Axis::new("a", 0..=u32::MAX),
                Axis::new("b", 0..=u32::MAX),
                Axis::new("c", u32::MAX - 1..=u32::MAX),
            ],
        )
        .unwrap();
        let log = Recorder::default();
        let urls: Vec<String> = sweep
            .targets(&log)
            .take(3)
            .map(|t| t.unwrap().url)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://example.org/0/0/4294967294",
                "https://example.org/0/0/4294967295",
                "https://example.org/0/1/4294967294",
            ]
        );
    }

    #[test]
    fn single_full_width_axis_len() {
        let sweep = Sweep::new("wide", "/{a}", vec![Axis::new("a", 0..=u32::MAX)]).unwrap();
        assert_eq!(sweep.len(), 1 << 32);
    }

    #[test]
    fn axis_padding() {
        assert_eq!(Axis::new("v", 1..=1).padded(3).render(7), "007");
        assert_eq!(Axis::new("v", 1..=1).padded(5).render(123), "00123");
        assert_eq!(Axis::new("v", 1..=1).padded(3).render(1234), "1234");
        assert_eq!(Axis::new("y", 1..=1).render(2020), "2020");
    }
}
