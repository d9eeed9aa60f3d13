//! Diesel schema for the Taskhub relational layout.
//!
//! Soft-deletable tables carry `deleted_at`; `task_history` is append-only
//! and has no deletion or update stamps.

diesel::table! {
    /// User records.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Login email, unique among non-deleted rows.
        #[max_length = 255]
        email -> Varchar,
        /// One-way password hash.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Given name.
        #[max_length = 100]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 100]
        last_name -> Varchar,
        /// Optional avatar location.
        #[max_length = 255]
        avatar_url -> Nullable<Varchar>,
        /// Active flag.
        is_active -> Bool,
        /// Last-login timestamp.
        last_login_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Role records.
    roles (id) {
        /// Role identifier.
        id -> Uuid,
        /// Unique role name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Active flag.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// User-to-role assignment rows.
    user_roles (user_id, role_id) {
        /// Assigned user.
        user_id -> Uuid,
        /// Assigned role.
        role_id -> Uuid,
        /// Assignment timestamp.
        assigned_at -> Timestamptz,
    }
}

diesel::table! {
    /// Category records.
    categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Category name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional display color.
        #[max_length = 30]
        color -> Nullable<Varchar>,
        /// Active flag.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 200]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Status label.
        #[max_length = 50]
        status -> Varchar,
        /// Optional start date.
        start_date -> Nullable<Timestamptz>,
        /// Optional end date.
        end_date -> Nullable<Timestamptz>,
        /// Optional display color.
        #[max_length = 30]
        color -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Priority in the 1-5 band.
        priority -> Int4,
        /// Creator reference.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Task-to-user assignment rows.
    task_assignments (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned user.
        user_id -> Uuid,
        /// Acceptance status.
        #[max_length = 50]
        status -> Varchar,
        /// Assignment timestamp.
        assigned_at -> Timestamptz,
        /// Acceptance timestamp.
        accepted_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Task-to-category join rows.
    task_categories (task_id, category_id) {
        /// Linked task.
        task_id -> Uuid,
        /// Linked category.
        category_id -> Uuid,
    }
}

diesel::table! {
    /// Task-to-project join rows.
    task_projects (task_id, project_id) {
        /// Linked task.
        task_id -> Uuid,
        /// Linked project.
        project_id -> Uuid,
    }
}

diesel::table! {
    /// Comment records.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Comment author.
        author_id -> Uuid,
        /// Text content.
        content -> Text,
        /// Internal-visibility flag.
        is_internal -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only task audit entries.
    task_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Audited task.
        task_id -> Uuid,
        /// Acting user.
        user_id -> Uuid,
        /// Changed field name.
        #[max_length = 100]
        field -> Varchar,
        /// Value before the change.
        old_value -> Nullable<Text>,
        /// Value after the change.
        new_value -> Nullable<Text>,
        /// Action label.
        #[max_length = 50]
        action -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
