use crate::models::{ErrorBody, ListParams, NewPet, Pet, PetId};
use crate::state::PetStore;
use routedoc::prelude::*;

pub async fn list_pets(
    State(store): State<PetStore>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Json<Vec<Pet>> {
    let limit = params.limit.unwrap_or(20) as usize;
    let pets = store
        .list()
        .await
        .into_iter()
        .filter(|pet| params.species.map_or(true, |s| pet.species == s))
        .take(limit)
        .collect();
    Json(pets)
}

pub async fn create_pet(
    State(store): State<PetStore>,
    ValidatedJson(new): ValidatedJson<NewPet>,
) -> (StatusCode, Json<Pet>) {
    let pet = store.insert(new).await;
    tracing::info!(id = pet.id, name = %pet.name, "Pet created");
    (StatusCode::CREATED, Json(pet))
}

pub async fn get_pet(
    State(store): State<PetStore>,
    ValidatedPath(PetId { id }): ValidatedPath<PetId>,
) -> Result<Json<Pet>, HttpError> {
    store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(format!("pet {id} not found")))
}

pub async fn delete_pet(
    State(store): State<PetStore>,
    ValidatedPath(PetId { id }): ValidatedPath<PetId>,
) -> Result<StatusCode, HttpError> {
    match store.remove(id).await {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(HttpError::NotFound(format!("pet {id} not found"))),
    }
}

pub fn routes() -> DocumentedRouter<PetStore> {
    DocumentedRouter::new()
        .get(
            "/pets",
            list_pets,
            describe_route()
                .summary("List pets")
                .tag("pets")
                .input::<ValidatedQuery<ListParams>>()
                .response(
                    ResponseDoc::new(200, "Pets in the store")
                        .schema::<Vec<Pet>>()
                        .header("x-total-count", serde_json::json!({ "type": "integer" })),
                ),
        )
        .post(
            "/pets",
            create_pet,
            describe_route()
                .summary("Add a pet")
                .tag("pets")
                .security("bearerAuth", &[])
                .input::<ValidatedJson<NewPet>>()
                .response_with::<Pet>(201, "Pet created")
                .response_with::<ErrorBody>(400, "Invalid pet"),
        )
        .get(
            "/pets/{id}",
            get_pet,
            describe_route()
                .summary("Find a pet by id")
                .tag("pets")
                .input::<ValidatedPath<PetId>>()
                .response_with::<Pet>(200, "The pet")
                .response_with::<ErrorBody>(404, "No such pet"),
        )
        .delete(
            "/pets/{id}",
            delete_pet,
            describe_route()
                .summary("Remove a pet")
                .tag("pets")
                .security("bearerAuth", &[])
                .input::<ValidatedPath<PetId>>()
                .response(ResponseDoc::new(204, "Pet removed"))
                .response_with::<ErrorBody>(404, "No such pet"),
        )
}
