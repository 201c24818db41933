use errors::GraphError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use validator::Validate;

/// Actor id of the reference node used when configuration does not override it.
pub const DEFAULT_REFERENCE_ACTOR_ID: &str = "nm0000102";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for ActorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ActorId {
    type Err = GraphError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| GraphError::validation("actorId", "must not be empty"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for MovieId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for MovieId {
    type Err = GraphError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| GraphError::validation("movieId", "must not be empty"))
    }
}

/// Request to create an actor node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewActor {
    #[validate(length(min = 1, message = "actorId must not be empty"))]
    pub actor_id: String,

    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

impl NewActor {
    pub fn new(actor_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            name: name.into(),
        }
    }
}

/// Request to create a movie node.
///
/// `genres` is a tag set: duplicates collapse on insert and order is not
/// significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    #[validate(length(min = 1, message = "movieId must not be empty"))]
    pub movie_id: String,

    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "at least one genre is required"),
        custom(function = "validate_genre_tags")
    )]
    pub genres: Vec<String>,
}

impl NewMovie {
    pub fn new<I, G>(movie_id: impl Into<String>, name: impl Into<String>, genres: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        Self {
            movie_id: movie_id.into(),
            name: name.into(),
            genres: genres.into_iter().map(Into::into).collect(),
        }
    }
}

fn validate_genre_tags(genres: &[String]) -> Result<(), validator::ValidationError> {
    if genres.iter().any(String::is_empty) {
        let mut err = validator::ValidationError::new("empty_genre");
        err.message = Some("genre tags must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Request to create an ACTED_IN edge from an actor to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRelationship {
    #[validate(length(min = 1, message = "actorId must not be empty"))]
    pub actor_id: String,

    #[validate(length(min = 1, message = "movieId must not be empty"))]
    pub movie_id: String,
}

impl NewRelationship {
    pub fn new(actor_id: impl Into<String>, movie_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            movie_id: movie_id.into(),
        }
    }
}

/// Runs `validator` rules and folds the first failing field into a
/// [`GraphError::Validation`]. Fields are inspected in name order so the
/// reported field is stable.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), GraphError> {
    request.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        match fields.first() {
            Some((field, errs)) => {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map_or_else(|| "is invalid".to_string(), ToString::to_string);
                GraphError::validation(field.to_string(), reason)
            }
            None => GraphError::validation("request", errors.to_string()),
        }
    })
}

/// Actor with the names of the movies it acted in, ordered by movie id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDetails {
    pub actor_id: ActorId,
    pub name: String,
    pub movies: Vec<String>,
}

/// Movie with its genres and the names of its cast, ordered by actor id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub movie_id: MovieId,
    pub name: String,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

/// One row of the out-degree ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedActor {
    pub actor_id: ActorId,
    pub name: String,
    #[serde(rename = "totalMovies")]
    pub out_degree: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub movie_id: MovieId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub actor_count: usize,
    pub movie_count: usize,
    pub relationship_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_reject_empty() {
        assert!(ActorId::new("").is_none());
        assert!(MovieId::new(String::new()).is_none());
        assert_eq!(ActorId::new("a1").unwrap().as_str(), "a1");
    }

    #[test]
    fn test_id_from_str() {
        let id: ActorId = "nm0000102".parse().unwrap();
        assert_eq!(id.to_string(), "nm0000102");

        let err = "".parse::<MovieId>().unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ActorId::new("a1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1\"");
    }

    #[test]
    fn test_new_actor_validation() {
        assert!(validate_request(&NewActor::new("a1", "Alice")).is_ok());

        let err = validate_request(&NewActor::new("", "Alice")).unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));

        let err = validate_request(&NewActor::new("a1", "")).unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));
    }

    #[test]
    fn test_new_movie_requires_genres() {
        let empty: Vec<String> = Vec::new();
        let err = validate_request(&NewMovie::new("m1", "Film", empty)).unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));

        let err = validate_request(&NewMovie::new("m1", "Film", ["Drama", ""])).unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));

        assert!(validate_request(&NewMovie::new("m1", "Film", ["Drama"])).is_ok());
    }

    #[test]
    fn test_new_actor_deserializes_camel_case() {
        let actor: NewActor =
            serde_json::from_str(r#"{"actorId": "a1", "name": "Alice"}"#).unwrap();
        assert_eq!(actor, NewActor::new("a1", "Alice"));
    }

    #[test]
    fn test_ranked_actor_wire_name() {
        let row = RankedActor {
            actor_id: ActorId::new("a1").unwrap(),
            name: "Alice".to_string(),
            out_degree: 3,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["totalMovies"], 3);
        assert_eq!(json["actorId"], "a1");
    }
}
