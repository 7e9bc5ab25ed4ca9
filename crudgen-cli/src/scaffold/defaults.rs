//! Built-in stubs
//!
//! Used whenever the project's stub directory has no file of the same name.
//! `crudgen stubs publish` copies them into the project for customisation.

/// Model stub
pub const MODEL_STUB: &str = r"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;

class {{modelName}} extends Model
{
    use HasFactory;

    protected $fillable = [{{fillable}}];
}
";

/// Controller stub
pub const CONTROLLER_STUB: &str = r"<?php

namespace App\Http\Controllers;

use App\Helpers\FlashHelper;
use App\Models\{{modelName}};
use Illuminate\Http\Request;

class {{modelName}}Controller extends Controller
{
    public function __construct()
    {
        $this->middleware('permission:view-{{modelNamePluralLowerCase}}')->only('index', 'show');
        $this->middleware('permission:create-{{modelNamePluralLowerCase}}')->only('create', 'store');
        $this->middleware('permission:edit-{{modelNamePluralLowerCase}}')->only('edit', 'update');
        $this->middleware('permission:delete-{{modelNamePluralLowerCase}}')->only('destroy');
    }

    public function index()
    {
        ${{modelNamePluralLowerCase}} = {{modelName}}::paginate(10);
        return view('{{modelNamePluralLowerCase}}.index', compact('{{modelNamePluralLowerCase}}'));
    }

    public function create()
    {
        return view('{{modelNamePluralLowerCase}}.create');
    }

    public function store(Request $request)
    {
        $validated = $request->validate([
            {{validationRules}}
        ]);

        {{modelName}}::create($validated);

        FlashHelper::success('{{modelName}} created successfully.');
        return redirect()->route('{{modelNamePluralLowerCase}}.index');
    }

    public function edit({{modelName}} ${{modelNameSingularLowerCase}})
    {
        return view('{{modelNamePluralLowerCase}}.edit', ['item' => ${{modelNameSingularLowerCase}}]);
    }

    public function update(Request $request, {{modelName}} ${{modelNameSingularLowerCase}})
    {
        $validated = $request->validate([
            {{validationRules}}
        ]);

        ${{modelNameSingularLowerCase}}->update($validated);

        FlashHelper::success('{{modelName}} updated successfully.');
        return redirect()->route('{{modelNamePluralLowerCase}}.index');
    }

    public function destroy({{modelName}} ${{modelNameSingularLowerCase}})
    {
        ${{modelNameSingularLowerCase}}->delete();
        FlashHelper::success('{{modelName}} deleted successfully.');
        return redirect()->route('{{modelNamePluralLowerCase}}.index');
    }
}
";

/// List view stub
pub const INDEX_VIEW_STUB: &str = r#"@extends('adminlte::page')

@section('title', '{{modelName}}')

@section('content_header')
    <h1>{{modelName}}</h1>
@stop

@section('content')
    <div class="card">
        <div class="card-header">
            <h3 class="card-title">{{modelName}} List</h3>
            @can('create-{{modelNamePluralLowerCase}}')
                <div class="card-tools">
                    <a href="{{ route('{{modelNamePluralLowerCase}}.create') }}" class="btn btn-primary">
                        <i class="fas fa-plus"></i> Create {{modelName}}
                    </a>
                </div>
            @endcan
        </div>
        <div class="card-body">
            @if(session('success'))
                <div class="alert alert-success alert-dismissible">
                    <button type="button" class="close" data-dismiss="alert" aria-hidden="true">×</button>
                    {{ session('success') }}
                </div>
            @endif

            <table class="table table-bordered">
                <thead>
                    <tr>
{{fields}}
                        <th>Actions</th>
                    </tr>
                </thead>
                <tbody>
                    @foreach(${{modelNamePluralLowerCase}} as $item)
                        <tr>
{{rowFields}}
                            <td>
                                <div class="btn-group">
                                    @can('edit-{{modelNamePluralLowerCase}}')
                                        <a href="{{ route('{{modelNamePluralLowerCase}}.edit', $item) }}" class="btn btn-warning btn-sm">
                                            <i class="fas fa-edit"></i>
                                        </a>
                                    @endcan
                                    @can('delete-{{modelNamePluralLowerCase}}')
                                        <form action="{{ route('{{modelNamePluralLowerCase}}.destroy', $item) }}" method="POST" style="display: inline;">
                                            @csrf
                                            @method('DELETE')
                                            <button type="submit" class="btn btn-danger btn-sm" onclick="return confirm('Are you sure?')">
                                                <i class="fas fa-trash"></i>
                                            </button>
                                        </form>
                                    @endcan
                                </div>
                            </td>
                        </tr>
                    @endforeach
                </tbody>
            </table>
        </div>
        <div class="card-footer clearfix">
            {{ ${{modelNamePluralLowerCase}}->links() }}
        </div>
    </div>
@stop
"#;

/// Create form stub
pub const CREATE_VIEW_STUB: &str = r#"@extends('adminlte::page')

@section('title', 'Create {{modelName}}')

@section('content_header')
    <h1>Create {{modelName}}</h1>
@stop

@section('content')
    <div class="card">
        <div class="card-body">
            <form action="{{ route('{{modelNamePluralLowerCase}}.store') }}" method="POST" enctype="multipart/form-data">
                @csrf
{{fields}}

                <button type="submit" class="btn btn-primary">Create {{modelName}}</button>
                <a href="{{ route('{{modelNamePluralLowerCase}}.index') }}" class="btn btn-default">Cancel</a>
            </form>
        </div>
    </div>
@stop
"#;

/// Edit form stub
pub const EDIT_VIEW_STUB: &str = r#"@extends('adminlte::page')

@section('title', 'Edit {{modelName}}')

@section('content_header')
    <h1>Edit {{modelName}}</h1>
@stop

@section('content')
    <div class="card">
        <div class="card-body">
            <form action="{{ route('{{modelNamePluralLowerCase}}.update', $item) }}" method="POST" enctype="multipart/form-data">
                @csrf
                @method('PUT')
{{fields}}

                <button type="submit" class="btn btn-primary">Update {{modelName}}</button>
                <a href="{{ route('{{modelNamePluralLowerCase}}.index') }}" class="btn btn-default">Cancel</a>
            </form>
        </div>
    </div>
@stop
"#;

/// Look up a built-in stub by name
#[must_use]
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "Model" => Some(MODEL_STUB),
        "Controller" => Some(CONTROLLER_STUB),
        "views/index" => Some(INDEX_VIEW_STUB),
        "views/create" => Some(CREATE_VIEW_STUB),
        "views/edit" => Some(EDIT_VIEW_STUB),
        _ => None,
    }
}
