//! Outbound publication seam towards the UI layer.

/// Receives the full serialized event log after each mutating command.
///
/// Implementations must not assume they see every intermediate state twice;
/// each call carries the complete log in append order, one JSON object
/// string per event.
pub trait Publisher {
    fn publish(&mut self, log: &[String]);
}

impl<F> Publisher for F
where
    F: FnMut(&[String]),
{
    fn publish(&mut self, log: &[String]) {
        self(log)
    }
}

/// Publisher that keeps every publication in memory.
///
/// Used by the UI bridge to hand the latest log back to the caller, and by
/// tests to count publish calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingPublisher {
    publications: Vec<Vec<String>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all publications in call order.
    pub fn publications(&self) -> &[Vec<String>] {
        &self.publications
    }

    /// Returns the most recent publication, if any.
    pub fn latest(&self) -> Option<&[String]> {
        self.publications.last().map(Vec::as_slice)
    }

    /// Removes and returns the most recent publication, dropping older ones.
    pub fn take_latest(&mut self) -> Option<Vec<String>> {
        let latest = self.publications.pop();
        self.publications.clear();
        latest
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, log: &[String]) {
        self.publications.push(log.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::{Publisher, RecordingPublisher};

    #[test]
    fn recording_publisher_keeps_call_order() {
        let mut publisher = RecordingPublisher::new();
        publisher.publish(&["a".to_string()]);
        publisher.publish(&["a".to_string(), "b".to_string()]);

        assert_eq!(publisher.publications().len(), 2);
        assert_eq!(publisher.latest().map(<[String]>::len), Some(2));
        assert_eq!(
            publisher.take_latest(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(publisher.publications().is_empty());
    }

    #[test]
    fn closures_act_as_publishers() {
        let mut calls = 0;
        {
            let mut publisher = |log: &[String]| calls += log.len();
            publisher.publish(&["x".to_string()]);
        }
        assert_eq!(calls, 1);
    }
}
