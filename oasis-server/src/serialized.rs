//! All schemas that are exposed from endpoints are defined here
//! along with the ToSerialized impls

use chrono::{DateTime, Utc};
use oasis_core::{
    catalog::{MembershipPlan as CoreMembershipPlan, ScheduleDay as CoreScheduleDay, StudioClass},
    Exercise as CoreExercise, SavedWorkout as CoreSavedWorkout, WorkoutPlan,
};
use oasis_studio::{
    AuthorSnapshot, BlogPost, Comment as StudioComment, PlanSource, Recommendation as StudioRecommendation,
    SessionData, UserData,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    name: String,
    username: String,
    is_admin: bool,
    avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    token: String,
    user: User,
    #[schema(value_type = String)]
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    id: String,
    name: String,
    is_admin: bool,
    avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: String,
    content: String,
    #[schema(value_type = String)]
    date: DateTime<Utc>,
    author: Author,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: String,
    title: String,
    category: String,
    content: String,
    image: Option<String>,
    #[schema(value_type = String)]
    date: DateTime<Utc>,
    likes: usize,
    liked_by: Vec<String>,
    comments: Vec<Comment>,
    author: Author,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Exercise {
    name: String,
    sets: String,
    reps: String,
    notes: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    plan_name: String,
    difficulty: String,
    duration: String,
    warmup: String,
    exercises: Vec<Exercise>,
    cooldown: String,
    target_goal: Option<String>,
    target_level: Option<String>,
    target_equipment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkout {
    index: usize,
    workout: Workout,
    #[schema(value_type = String)]
    date_created: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    plan: Workout,
    /// Either `bank` or `generated`
    source: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    title: String,
    description: String,
    /// The content key to edit to change the image
    image_key: String,
    image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduledClass {
    time: String,
    name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleDay {
    day: String,
    events: Vec<ScheduledClass>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPlan {
    name: String,
    /// The content key to edit to change the price
    price_key: String,
    price: String,
    billing_note: Option<String>,
    perks: Vec<String>,
    highlighted: bool,
}

/// Helper trait to convert any type into a serialized version
pub trait ToSerialized<T>
where
    T: Serialize,
{
    fn to_serialized(&self) -> T;
}

impl<I, O> ToSerialized<Vec<O>> for Vec<I>
where
    I: ToSerialized<O>,
    O: Serialize,
{
    fn to_serialized(&self) -> Vec<O> {
        self.iter().map(|x| x.to_serialized()).collect()
    }
}

impl ToSerialized<User> for UserData {
    fn to_serialized(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            is_admin: self.is_admin,
            avatar: self.avatar.clone(),
        }
    }
}

impl ToSerialized<LoginResult> for SessionData {
    fn to_serialized(&self) -> LoginResult {
        LoginResult {
            token: self.token.clone(),
            user: self.user.to_serialized(),
            expires_at: self.expires_at,
        }
    }
}

impl ToSerialized<Author> for AuthorSnapshot {
    fn to_serialized(&self) -> Author {
        Author {
            id: self.id.clone(),
            name: self.name.clone(),
            is_admin: self.is_admin,
            avatar: self.avatar.clone(),
        }
    }
}

impl ToSerialized<Comment> for StudioComment {
    fn to_serialized(&self) -> Comment {
        Comment {
            id: self.id.clone(),
            content: self.content.clone(),
            date: self.date,
            author: self.author.to_serialized(),
        }
    }
}

impl ToSerialized<Post> for BlogPost {
    fn to_serialized(&self) -> Post {
        Post {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            content: self.content.clone(),
            image: self.image.clone(),
            date: self.date,
            likes: self.liked_by.len(),
            liked_by: self.liked_by.iter().cloned().collect(),
            comments: self.comments.to_serialized(),
            author: self.author.to_serialized(),
        }
    }
}

impl ToSerialized<Exercise> for CoreExercise {
    fn to_serialized(&self) -> Exercise {
        Exercise {
            name: self.name.clone(),
            sets: self.sets.clone(),
            reps: self.reps.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl ToSerialized<Workout> for WorkoutPlan {
    fn to_serialized(&self) -> Workout {
        Workout {
            plan_name: self.plan_name.clone(),
            difficulty: self.difficulty.clone(),
            duration: self.duration.clone(),
            warmup: self.warmup.clone(),
            exercises: self.exercises.to_serialized(),
            cooldown: self.cooldown.clone(),
            target_goal: self.target_goal.map(|g| g.to_string()),
            target_level: self.target_level.map(|l| l.to_string()),
            target_equipment: self.target_equipment.map(|e| e.to_string()),
        }
    }
}

impl ToSerialized<Recommendation> for StudioRecommendation {
    fn to_serialized(&self) -> Recommendation {
        let source = match self.source {
            PlanSource::Bank => "bank",
            PlanSource::Generated => "generated",
        };

        Recommendation {
            plan: self.plan.to_serialized(),
            source: source.to_string(),
        }
    }
}

impl ToSerialized<ScheduleDay> for CoreScheduleDay {
    fn to_serialized(&self) -> ScheduleDay {
        ScheduleDay {
            day: self.day.to_string(),
            events: self
                .events
                .iter()
                .map(|e| ScheduledClass {
                    time: e.time.to_string(),
                    name: e.name.to_string(),
                })
                .collect(),
        }
    }
}

impl ToSerialized<MembershipPlan> for CoreMembershipPlan {
    fn to_serialized(&self) -> MembershipPlan {
        MembershipPlan {
            name: self.name.to_string(),
            price_key: self.price_key.to_string(),
            price: self.price.clone(),
            billing_note: self.billing_note.map(String::from),
            perks: self.perks.iter().map(|p| p.to_string()).collect(),
            highlighted: self.highlighted,
        }
    }
}

/// Classes carry the current image from the editable content
pub fn class(class: &StudioClass, image: Option<String>) -> Class {
    Class {
        title: class.title.to_string(),
        description: class.description.to_string(),
        image_key: class.image_key.to_string(),
        image,
    }
}

/// Saved workouts are addressed by their position in the list
pub fn saved_workouts(saved: &[CoreSavedWorkout]) -> Vec<SavedWorkout> {
    saved
        .iter()
        .enumerate()
        .map(|(index, saved)| SavedWorkout {
            index,
            workout: saved.plan.to_serialized(),
            date_created: saved.date_created,
        })
        .collect()
}
