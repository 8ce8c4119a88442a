use showroom_scraper::{rank_rooms, ShowroomClient, DEFAULT_TOP_N};

#[tokio::main]
async fn main() {
    let client = ShowroomClient::new();

    let events = client.get_events().await;
    println!("Found {} events", events.len());
    let Some(event) = events.first() else {
        println!("No events found");
        return;
    };

    println!(
        "{} (id:{}) {} - {} [{}]",
        event.event_name,
        event.event_id,
        event.started_str(),
        event.ended_str(),
        event.entry_scope,
    );
    if let Some(total) = client.get_total_entries(&event.event_id).await {
        println!("{total} participating rooms");
    }

    let rooms = client.get_event_rooms(&event.event_id).await;
    let ranked = rank_rooms(&rooms, DEFAULT_TOP_N);
    if ranked.is_empty() {
        println!("No participant rooms found");
        return;
    }

    let room_ids: Vec<String> = ranked.iter().map(|room| room.room_id.clone()).collect();
    let profiles = client.get_room_profiles(&room_ids).await;
    for (room, profile) in ranked.iter().zip(&profiles) {
        println!(
            "{} rank:{} lv:{} followers:{} {}",
            profile.room_name,
            room.rank_label.as_deref().unwrap_or("-"),
            profile.room_level.unwrap_or(-1),
            profile.follower_num.unwrap_or(-1),
            profile.profile_url(client.config()),
        );
    }
}
