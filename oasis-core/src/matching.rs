use rand::{seq::SliceRandom, Rng};

use crate::{Equipment, UserPreferences, WorkoutPlan};

/// Picks the best fitting template for the given preferences.
///
/// Templates are first narrowed down to the requested equipment class, then
/// matched by goal and level, relaxing level first and goal second. When
/// neither matches, any template for the right equipment is returned. Ties
/// within a tier are broken with `rng`.
///
/// Returns [None] only if no template exists for the equipment class.
pub fn find_template<R>(
    templates: &[WorkoutPlan],
    preferences: &UserPreferences,
    rng: &mut R,
) -> Option<WorkoutPlan>
where
    R: Rng + ?Sized,
{
    let mut candidates = with_equipment(templates, preferences.equipment);

    // Bodyweight workouts are the only ones guaranteed to work with a basic home gym
    if candidates.is_empty() && preferences.equipment == Equipment::HomeGymBasic {
        candidates = with_equipment(templates, Equipment::BodyweightOnly);
    }

    if candidates.is_empty() {
        return None;
    }

    let goal = Some(preferences.goal);
    let level = Some(preferences.level);

    let exact = |t: &WorkoutPlan| t.target_goal == goal && t.target_level == level;
    let by_goal = |t: &WorkoutPlan| t.target_goal == goal;
    let by_level = |t: &WorkoutPlan| t.target_level == level;

    let tiers: [&dyn Fn(&WorkoutPlan) -> bool; 3] = [&exact, &by_goal, &by_level];

    let chosen = tiers
        .iter()
        .map(|matches| {
            candidates
                .iter()
                .copied()
                .filter(|&t| matches(t))
                .collect::<Vec<_>>()
        })
        .find(|tier| !tier.is_empty())
        .and_then(|tier| tier.choose(rng).copied())
        .or_else(|| candidates.choose(rng).copied())?;

    let mut plan = chosen.clone();
    plan.duration = preferences.duration.clone();

    Some(plan)
}

fn with_equipment(templates: &[WorkoutPlan], equipment: Equipment) -> Vec<&WorkoutPlan> {
    templates
        .iter()
        .filter(|t| t.target_equipment == Some(equipment))
        .collect()
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{Exercise, Goal, Level};

    fn template(name: &str, goal: Goal, level: Level, equipment: Equipment) -> WorkoutPlan {
        WorkoutPlan {
            plan_name: name.to_string(),
            difficulty: level.label().to_string(),
            duration: "45".to_string(),
            warmup: "5 min de mobilidade".to_string(),
            exercises: vec![Exercise {
                name: "Agachamento".to_string(),
                sets: "3".to_string(),
                reps: "12".to_string(),
                notes: String::new(),
            }],
            cooldown: "Alongamento".to_string(),
            target_goal: Some(goal),
            target_level: Some(level),
            target_equipment: Some(equipment),
        }
    }

    fn prefs(goal: Goal, level: Level, equipment: Equipment, duration: &str) -> UserPreferences {
        UserPreferences {
            goal,
            level,
            equipment,
            duration: duration.to_string(),
        }
    }

    fn bank() -> Vec<WorkoutPlan> {
        vec![
            template("A", Goal::BuildMuscle, Level::Beginner, Equipment::FullGym),
            template("B", Goal::BuildMuscle, Level::Advanced, Equipment::FullGym),
            template("C", Goal::LoseWeight, Level::Intermediate, Equipment::FullGym),
            template("D", Goal::Strength, Level::Advanced, Equipment::DumbbellsOnly),
            template("E", Goal::Mobility, Level::Beginner, Equipment::BodyweightOnly),
        ]
    }

    #[test]
    fn exact_match_wins() {
        let mut rng = StdRng::seed_from_u64(1);
        let request = prefs(Goal::BuildMuscle, Level::Advanced, Equipment::FullGym, "60");

        for _ in 0..20 {
            let plan = find_template(&bank(), &request, &mut rng).unwrap();

            assert_eq!(plan.plan_name, "B");
            assert_eq!(plan.target_goal, Some(request.goal));
            assert_eq!(plan.target_level, Some(request.level));
            assert_eq!(plan.target_equipment, Some(request.equipment));
        }
    }

    #[test]
    fn relaxes_level_before_goal() {
        let mut rng = StdRng::seed_from_u64(2);
        let bank = vec![
            template("Goal", Goal::LoseWeight, Level::Intermediate, Equipment::DumbbellsOnly),
            template("Level", Goal::Strength, Level::Beginner, Equipment::DumbbellsOnly),
        ];

        let request = prefs(
            Goal::LoseWeight,
            Level::Beginner,
            Equipment::DumbbellsOnly,
            "30",
        );

        for _ in 0..20 {
            let plan = find_template(&bank, &request, &mut rng).unwrap();
            assert_eq!(plan.plan_name, "Goal");
        }
    }

    #[test]
    fn relaxes_goal_when_no_goal_matches() {
        let mut rng = StdRng::seed_from_u64(3);
        let bank = vec![
            template("Other", Goal::Strength, Level::Advanced, Equipment::FullGym),
            template("Level", Goal::Mobility, Level::Beginner, Equipment::FullGym),
        ];

        let request = prefs(Goal::LoseWeight, Level::Beginner, Equipment::FullGym, "45");

        for _ in 0..20 {
            let plan = find_template(&bank, &request, &mut rng).unwrap();
            assert_eq!(plan.plan_name, "Level");
        }
    }

    #[test]
    fn falls_back_to_any_template_with_the_right_equipment() {
        let mut rng = StdRng::seed_from_u64(4);
        let request = prefs(
            Goal::Endurance,
            Level::Intermediate,
            Equipment::DumbbellsOnly,
            "15",
        );

        let plan = find_template(&bank(), &request, &mut rng).unwrap();

        assert_eq!(plan.plan_name, "D");
        assert_eq!(plan.duration, "15");
    }

    #[test]
    fn tier_two_scenario() {
        let mut rng = StdRng::seed_from_u64(5);
        let bank = vec![template(
            "Queima com Halteres",
            Goal::LoseWeight,
            Level::Intermediate,
            Equipment::DumbbellsOnly,
        )];

        let request = prefs(
            Goal::LoseWeight,
            Level::Beginner,
            Equipment::DumbbellsOnly,
            "30",
        );

        let plan = find_template(&bank, &request, &mut rng).unwrap();

        assert_eq!(plan.plan_name, "Queima com Halteres");
        assert_eq!(plan.duration, "30");
    }

    #[test]
    fn missing_equipment_returns_none() {
        let mut rng = StdRng::seed_from_u64(6);
        let bank = vec![template(
            "A",
            Goal::BuildMuscle,
            Level::Beginner,
            Equipment::FullGym,
        )];

        let request = prefs(
            Goal::BuildMuscle,
            Level::Beginner,
            Equipment::DumbbellsOnly,
            "30",
        );

        assert_eq!(find_template(&bank, &request, &mut rng), None);
        assert_eq!(find_template(&[], &request, &mut rng), None);
    }

    #[test]
    fn home_gym_falls_back_to_bodyweight() {
        let mut rng = StdRng::seed_from_u64(7);
        let request = prefs(
            Goal::Mobility,
            Level::Beginner,
            Equipment::HomeGymBasic,
            "20",
        );

        let plan = find_template(&bank(), &request, &mut rng).unwrap();

        assert_eq!(plan.plan_name, "E");
        assert_eq!(plan.duration, "20");

        // Only bodyweight is a valid substitute
        let no_bodyweight: Vec<_> = bank()
            .into_iter()
            .filter(|t| t.target_equipment != Some(Equipment::BodyweightOnly))
            .collect();

        assert_eq!(find_template(&no_bodyweight, &request, &mut rng), None);
    }

    #[test]
    fn never_none_and_duration_is_overwritten_for_every_request() {
        let mut rng = StdRng::seed_from_u64(8);
        let bank = bank();

        for goal in Goal::ALL {
            for level in Level::ALL {
                for equipment in [Equipment::FullGym, Equipment::DumbbellsOnly] {
                    let request = prefs(goal, level, equipment, "90");
                    let plan = find_template(&bank, &request, &mut rng)
                        .expect("equipment class has templates");

                    assert_eq!(plan.duration, "90");
                    assert_eq!(plan.target_equipment, Some(equipment));
                }
            }
        }
    }

    #[test]
    fn ties_are_broken_among_the_matching_tier() {
        let mut rng = StdRng::seed_from_u64(9);
        let bank = vec![
            template("One", Goal::Endurance, Level::Beginner, Equipment::FullGym),
            template("Two", Goal::Endurance, Level::Beginner, Equipment::FullGym),
            template("Off", Goal::Strength, Level::Advanced, Equipment::FullGym),
        ];

        let request = prefs(Goal::Endurance, Level::Beginner, Equipment::FullGym, "30");

        let names: std::collections::HashSet<_> = (0..64)
            .map(|_| find_template(&bank, &request, &mut rng).unwrap().plan_name)
            .collect();

        assert!(names.contains("One"));
        assert!(names.contains("Two"));
        assert!(!names.contains("Off"));
    }
}
