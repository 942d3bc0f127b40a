use booking_desk::application::dto::{DashboardStats, ReservationView, UserSummary};

pub fn show_reservations_debug_data(reservations: &[ReservationView]) {
    println!("\n=======================================================");
    println!("📋 [DEBUG] reservations ({} rows)", reservations.len());
    println!("=======================================================");

    if reservations.is_empty() {
        println!("   (none)");
    }
    for r in reservations {
        println!(
            "   #{:<3} {:<10} {} {} | {:<20} {}",
            r.id, r.status_label, r.preferred_date_long, r.preferred_time, r.full_name, r.phone_display
        );
        if let Some(notes) = &r.admin_notes {
            println!("        admin: {notes}");
        }
    }
    println!("=======================================================\n");
}

pub fn show_dashboard_stats_debug_data(stats: &DashboardStats) {
    println!(
        "📊 [DEBUG] total {} | pending {} confirmed {} completed {} cancelled {} | users {} admins {}",
        stats.total,
        stats.pending,
        stats.confirmed,
        stats.completed,
        stats.cancelled,
        stats.users,
        stats.admins
    );
}

pub fn show_users_debug_data(users: &[UserSummary]) {
    println!("👥 [DEBUG] users ({})", users.len());
    for u in users {
        println!(
            "   {:<8} {:<6} {:<25} {:<20} bookings: {}",
            u.id, u.role.as_str(), u.email, u.phone_display, u.reservation_count
        );
    }
}
