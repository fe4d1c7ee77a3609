use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::TryStreamExt;
use nearby_geo::{parse_line, Collector, GeoError, GeoPoint, Limits, NamedDistance};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, instrument};

/// Answers nearby location queries from a dataset on disk.
///
/// Every query opens and reads the dataset again, so changes to the file are
/// visible to the next query. Dropping a pending query closes the file.
#[derive(Clone)]
pub struct LocationProvider {
    dataset: Arc<PathBuf>,
}

impl LocationProvider {
    pub fn new(dataset: impl Into<PathBuf>) -> Self {
        Self { dataset: Arc::new(dataset.into()) }
    }

    pub fn dataset(&self) -> &Path {
        &self.dataset
    }

    /// Returns up to `max_results` locations within `max_distance` meters of
    /// `location`, closest first.
    #[instrument(skip_all, fields(
        latitude = location.latitude,
        longitude = location.longitude,
        max_distance = max_distance,
        max_results = max_results,
    ))]
    pub async fn nearby_locations(
        &self,
        location: GeoPoint,
        max_distance: f64,
        max_results: i64,
    ) -> nearby_geo::Result<Vec<NamedDistance>> {
        let limits = Limits::new(max_distance, max_results)?;

        let resource = self.dataset.display().to_string();

        let file = File::open(self.dataset.as_path())
            .await
            .map_err(|err| GeoError::access(&resource, err))?;

        let lines = LinesStream::new(BufReader::new(file).lines());

        let collector = lines
            .map_err(|err| GeoError::access(&resource, err))
            .try_fold(Collector::new(location, limits), |mut collector, line| async move {
                if let Some(record) = parse_line(&line)? {
                    collector.push(record);
                }

                Ok::<_, GeoError>(collector)
            })
            .await?;

        debug!("Found {} locations in reach", collector.len());

        Ok(collector.finish())
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use nearby_geo::{GeoError, GeoPoint, Limits};
    use tempfile::NamedTempFile;

    use super::LocationProvider;

    const ORIGIN: GeoPoint = GeoPoint::new(0.0, 0.0);

    fn dataset(text: &str) -> anyhow::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    #[tokio::test]
    async fn closest_two_within_reach() -> anyhow::Result<()> {
        let file = dataset("Name,Latitude,Longitude\n\"A\",\"0.0\",\"0.0\"\n\"B\",\"0.0\",\"1.0\"\n\"C\",\"0.0\",\"10.0\"\n")?;
        let provider = LocationProvider::new(file.path());

        let result = provider.nearby_locations(ORIGIN, 200_000.0, 2).await?;

        let names = result.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(result[0].distance_meters, 0.0);
        assert!((result[1].distance_meters - 111_189.57).abs() < 1.0);

        Ok(())
    }

    #[tokio::test]
    async fn same_result_as_blocking_scan() -> anyhow::Result<()> {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/nearby_geo/data/locations.csv");
        let provider = LocationProvider::new(path);
        let maastricht = GeoPoint::new(50.84833, 5.68889);

        let expected = nearby_geo::nearby_locations(path, maastricht, Limits::new(60_000.0, 6)?)?;
        let actual = provider.nearby_locations(maastricht, 60_000.0, 6).await?;

        assert_eq!(actual.len(), 6);
        assert_eq!(actual, expected);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_line_fails_without_results() -> anyhow::Result<()> {
        let file = dataset("\"A\",\"0.0\",\"0.0\"\n\"Place\",\"not-a-number\",\"5.0\"\n")?;
        let provider = LocationProvider::new(file.path());

        let err = provider.nearby_locations(ORIGIN, 1e9, 10).await.unwrap_err();
        assert!(matches!(err, GeoError::DataParsing { ref line } if line.contains("not-a-number")));

        Ok(())
    }

    #[tokio::test]
    async fn arguments_are_checked_before_the_dataset_is_opened() {
        let provider = LocationProvider::new("/does/not/exist.csv");

        let err = provider.nearby_locations(ORIGIN, 1e9, -1).await.unwrap_err();
        assert!(matches!(err, GeoError::InvalidArgument(_)));

        let err = provider.nearby_locations(ORIGIN, 1e9, 1).await.unwrap_err();
        assert!(matches!(err, GeoError::ResourceAccess { .. }));
    }

    #[tokio::test]
    async fn zero_results_and_empty_dataset() -> anyhow::Result<()> {
        let file = dataset("\"A\",\"0.0\",\"0.0\"\n")?;
        assert!(LocationProvider::new(file.path()).nearby_locations(ORIGIN, 1e9, 0).await?.is_empty());

        let file = dataset("")?;
        assert!(LocationProvider::new(file.path()).nearby_locations(ORIGIN, 1e9, 10).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn every_query_reads_the_current_file() -> anyhow::Result<()> {
        let mut file = dataset("\"A\",\"0.0\",\"0.0\"\n")?;
        let provider = LocationProvider::new(file.path());

        assert_eq!(provider.nearby_locations(ORIGIN, 1e9, 10).await?.len(), 1);

        file.write_all(b"\"B\",\"0.0\",\"1.0\"\n")?;
        file.flush()?;

        assert_eq!(provider.nearby_locations(ORIGIN, 1e9, 10).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_queries_are_independent() -> anyhow::Result<()> {
        let file = dataset("\"A\",\"0.0\",\"0.0\"\n\"B\",\"0.0\",\"1.0\"\n\"C\",\"0.0\",\"10.0\"\n")?;
        let provider = LocationProvider::new(file.path());

        let (near, far) = tokio::join!(
            provider.nearby_locations(ORIGIN, 1.0, 10),
            provider.nearby_locations(GeoPoint::new(0.0, 10.0), 1e9, 1),
        );

        assert_eq!(near?.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(far?.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(), vec!["C"]);

        Ok(())
    }
}
