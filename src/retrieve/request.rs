/// Retrieval requests and the targets they resolve to.

/// A well-known object together with whether its flag was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellKnownFlag {
    /// Object path behind the flag.
    pub object_path: String,
    /// Whether the flag was passed.
    pub selected: bool,
}

impl WellKnownFlag {
    #[must_use]
    pub fn new(object_path: impl Into<String>, selected: bool) -> Self {
        Self {
            object_path: object_path.into(),
            selected,
        }
    }
}

/// One object to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalTarget {
    /// Object path on the remote host.
    pub object_path: String,
}

/// A fully parsed request. Built once from the CLI and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalRequest {
    /// Remote terminal to query.
    pub host_name: String,
    /// Explicitly supplied object path, if any.
    pub direct_target: Option<String>,
    /// Well-known objects in declaration order.
    pub well_known: Vec<WellKnownFlag>,
    /// Also write each retrieved object to a file.
    pub persist_to_file: bool,
}

impl RetrievalRequest {
    /// The direct target, treating an empty string as absent.
    #[must_use]
    pub fn direct_target(&self) -> Option<&str> {
        self.direct_target.as_deref().filter(|t| !t.is_empty())
    }

    /// Resolve the objects to fetch.
    ///
    /// A direct target wins: it is the only target and the well-known flags
    /// are ignored. Otherwise every selected well-known object is returned in
    /// declaration order.
    #[must_use]
    pub fn targets(&self) -> Vec<RetrievalTarget> {
        if let Some(direct) = self.direct_target() {
            if self.well_known.iter().any(|f| f.selected) {
                tracing::warn!(
                    target_object = direct,
                    "direct target given together with well-known flags; flags ignored"
                );
            }
            return vec![RetrievalTarget {
                object_path: direct.to_owned(),
            }];
        }

        self.well_known
            .iter()
            .filter(|f| f.selected)
            .map(|f| RetrievalTarget {
                object_path: f.object_path.clone(),
            })
            .collect()
    }
}

/// Whether the request names anything to retrieve.
///
/// Fails only when there is no direct target and no flag is selected.
/// Exclusivity between the two is an argument-parsing concern.
#[must_use]
pub fn request_is_valid(direct_target: Option<&str>, well_known: &[WellKnownFlag]) -> bool {
    let has_direct = direct_target.is_some_and(|t| !t.is_empty());
    has_direct || well_known.iter().any(|f| f.selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(services: bool, logging: bool) -> Vec<WellKnownFlag> {
        vec![
            WellKnownFlag::new("/Configurations/RSS/EnabledServices", services),
            WellKnownFlag::new("/Configurations/EGA/Logging", logging),
        ]
    }

    fn request(direct: Option<&str>, services: bool, logging: bool) -> RetrievalRequest {
        RetrievalRequest {
            host_name: "TERM01".to_owned(),
            direct_target: direct.map(str::to_owned),
            well_known: flags(services, logging),
            persist_to_file: false,
        }
    }

    #[test]
    fn test_nothing_selected_is_invalid() {
        assert!(!request_is_valid(None, &flags(false, false)));
        assert!(!request_is_valid(Some(""), &flags(false, false)));
        assert!(!request_is_valid(None, &[]));
    }

    #[test]
    fn test_either_source_is_valid() {
        assert!(request_is_valid(Some("/Configurations/X"), &flags(false, false)));
        assert!(request_is_valid(None, &flags(false, true)));
        // Both present is not this check's concern.
        assert!(request_is_valid(Some("/Configurations/X"), &flags(true, true)));
    }

    #[test]
    fn test_targets_preserve_declaration_order() {
        let targets = request(None, true, true).targets();
        let paths: Vec<&str> = targets.iter().map(|t| t.object_path.as_str()).collect();
        assert_eq!(
            paths,
            ["/Configurations/RSS/EnabledServices", "/Configurations/EGA/Logging"]
        );
    }

    #[test]
    fn test_targets_skip_unselected() {
        let targets = request(None, false, true).targets();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].object_path, "/Configurations/EGA/Logging");
    }

    #[test]
    fn test_direct_target_wins() {
        let targets = request(Some("/Configurations/RSS/Data"), true, false).targets();
        assert_eq!(
            targets,
            vec![RetrievalTarget {
                object_path: "/Configurations/RSS/Data".to_owned()
            }]
        );
    }

    #[test]
    fn test_empty_direct_target_falls_back_to_flags() {
        let targets = request(Some(""), true, false).targets();
        assert_eq!(targets[0].object_path, "/Configurations/RSS/EnabledServices");
    }
}
